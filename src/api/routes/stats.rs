use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::require_player;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    compute_head_to_head, compute_leaderboard, compute_player_stats, compute_rankings,
    compute_team_streaks,
};
use crate::models::{
    HeadToHead, LeaderboardEntry, PlayerId, PlayerRef, PlayerStatSnapshot, Rankings, TeamStreak,
};

// ── Player Stats ────────────────────────────────────────────────

pub async fn player_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerStatSnapshot>, ApiError> {
    let id = PlayerId::from(id);
    require_player(state.repo.as_ref(), &id).await?;

    let matches = state.repo.matches_for_player(&id).await?;
    Ok(Json(compute_player_stats(&id, &matches)))
}

pub async fn player_rankings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Rankings>, ApiError> {
    let id = PlayerId::from(id);
    require_player(state.repo.as_ref(), &id).await?;

    let matches = state.repo.matches_for_player(&id).await?;
    Ok(Json(compute_rankings(&id, &matches)))
}

// ── Compare ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    /// Comma-separated player IDs
    pub players: Option<String>,
}

/// One selected player's stats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerComparison {
    pub player: PlayerRef,
    #[serde(flatten)]
    pub stats: PlayerStatSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub stats: Vec<PlayerComparison>,

    /// Only present when exactly two players are selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_to_head: Option<HeadToHead>,
}

fn parse_players(raw: Option<&str>) -> Result<Vec<PlayerId>, ApiError> {
    let mut ids: Vec<PlayerId> = Vec::new();
    for id in raw.unwrap_or_default().split(',').map(str::trim) {
        if id.is_empty() {
            continue;
        }
        let id = PlayerId::from(id);
        if ids.contains(&id) {
            return Err(ApiError::BadRequest(format!("Player {} selected twice", id)));
        }
        ids.push(id);
    }

    if ids.is_empty() {
        return Err(ApiError::BadRequest(
            "players must name at least one player ID".to_string(),
        ));
    }
    Ok(ids)
}

/// Stats for every selected player, plus head-to-head for a pair.
pub async fn compare_players(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<CompareResponse>, ApiError> {
    let ids = parse_players(params.players.as_deref())?;

    let mut stats = Vec::with_capacity(ids.len());
    let mut history = Vec::with_capacity(ids.len());
    for id in &ids {
        let player = require_player(state.repo.as_ref(), id).await?;
        let matches = state.repo.matches_for_player(id).await?;
        stats.push(PlayerComparison {
            player: player.to_ref(),
            stats: compute_player_stats(id, &matches),
        });
        history.push(matches);
    }

    let head_to_head = match (ids.as_slice(), history.first()) {
        ([a, b], Some(matches)) => Some(compute_head_to_head(a, b, matches)),
        _ => None,
    };
    debug!("Compared {} players", ids.len());

    Ok(Json(CompareResponse {
        stats,
        head_to_head,
    }))
}

// ── Global ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StreaksResponse {
    pub data: Vec<TeamStreak>,
}

pub async fn team_streaks(State(state): State<AppState>) -> Result<Json<StreaksResponse>, ApiError> {
    let matches = state.repo.list_matches().await?;
    let data = compute_team_streaks(&matches);
    debug!("{} team streaks from {} matches", data.len(), matches.len());

    Ok(Json(StreaksResponse { data }))
}

pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let players = state.repo.list_players().await?;
    let matches = state.repo.list_matches().await?;

    Ok(Json(compute_leaderboard(&players, &matches)))
}
