use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::require_player;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{compute_player_stats, compute_rankings, RECENT_WINDOW};
use crate::models::{
    MatchRecord, Player, PlayerId, PlayerStatSnapshot, Rankings, TeamSide,
};

// ── Roster ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlayersParams {
    pub include_archived: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<Player>,
}

pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<ListPlayersParams>,
) -> Result<Json<PlayerListResponse>, ApiError> {
    let include_archived = params.include_archived.unwrap_or(false);

    let mut players: Vec<Player> = state
        .repo
        .list_players()
        .await?
        .into_iter()
        .filter(|p| include_archived || !p.archived)
        .collect();
    players.sort_by_key(|p| p.name.to_lowercase());

    Ok(Json(PlayerListResponse { players }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    pub name: String,
    pub profile_picture: Option<String>,
}

impl PlayerRequest {
    fn validated_name(&self) -> Result<String, ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("Name is required".to_string()));
        }
        Ok(name.to_string())
    }

    fn profile_picture(&self) -> Option<String> {
        self.profile_picture
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }
}

pub async fn create_player(
    State(state): State<AppState>,
    Json(req): Json<PlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let mut player = Player::new(req.validated_name()?);
    if let Some(url) = req.profile_picture() {
        player = player.with_profile_picture(url);
    }

    let player = state.repo.create_player(player).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

// ── Player Detail ───────────────────────────────────────────────

/// A recent match from the viewed player's perspective.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMatch {
    #[serde(flatten)]
    pub record: MatchRecord,
    pub was_team1: bool,
    pub won: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetailResponse {
    pub player: Player,
    pub stats: PlayerStatSnapshot,
    pub rankings: Rankings,
    pub recent_matches: Vec<RecentMatch>,
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerDetailResponse>, ApiError> {
    let id = PlayerId::from(id);
    let player = require_player(state.repo.as_ref(), &id).await?;
    let matches = state.repo.matches_for_player(&id).await?;
    debug!("Building detail for {} from {} matches", player.name, matches.len());

    let stats = compute_player_stats(&id, &matches);
    let rankings = compute_rankings(&id, &matches);
    let recent_matches = matches
        .into_iter()
        .filter_map(|record| {
            let side = record.side_of(&id)?;
            Some(RecentMatch {
                was_team1: side == TeamSide::Team1,
                won: record.won_by(side),
                record,
            })
        })
        .take(RECENT_WINDOW)
        .collect();

    Ok(Json(PlayerDetailResponse {
        player,
        stats,
        rankings,
        recent_matches,
    }))
}

pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PlayerRequest>,
) -> Result<Json<Player>, ApiError> {
    let name = req.validated_name()?;
    let mut player = require_player(state.repo.as_ref(), &PlayerId::from(id)).await?;

    player.name = name;
    if let Some(url) = req.profile_picture() {
        player.profile_picture = url;
    }

    Ok(Json(state.repo.update_player(player).await?))
}

// ── Archive / Restore ───────────────────────────────────────────

pub async fn archive_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    set_archived(&state, id, true).await
}

pub async fn restore_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    set_archived(&state, id, false).await
}

async fn set_archived(state: &AppState, id: String, archived: bool) -> Result<Json<Player>, ApiError> {
    let mut player = require_player(state.repo.as_ref(), &PlayerId::from(id)).await?;
    if player.archived == archived {
        return Ok(Json(player));
    }

    player.archived = archived;
    Ok(Json(state.repo.update_player(player).await?))
}
