use std::collections::HashSet;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::pagination::{PageInfo, PageRequest};
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Match, MatchRecord, PlayerId, TeamSide};

// ── Match History ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchRecord>,
    pub pagination: PageInfo,
}

pub async fn list_matches(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let all = state.repo.list_matches().await?;
    let (matches, pagination) = page.take(&all);

    Ok(Json(MatchListResponse {
        matches,
        pagination,
    }))
}

// ── Record Match ────────────────────────────────────────────────

/// Highest score accepted for either team.
pub const MAX_SCORE: u32 = 99;

/// Body of `POST /api/matches`. Each team carries one score shared by both
/// of its players; `date` defaults to now.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatchRequest {
    pub date: Option<DateTime<Utc>>,
    pub team1_player_a_id: String,
    pub team1_player_b_id: String,
    pub team2_player_a_id: String,
    pub team2_player_b_id: String,
    pub team1_score: u32,
    pub team2_score: u32,
    pub winning_team: u8,
}

impl NewMatchRequest {
    /// Check the request's own shape and build the match.
    pub fn into_match(self) -> Result<Match, ApiError> {
        let ids: Vec<PlayerId> = [
            &self.team1_player_a_id,
            &self.team1_player_b_id,
            &self.team2_player_a_id,
            &self.team2_player_b_id,
        ]
        .iter()
        .map(|id| PlayerId::from(id.trim()))
        .collect();

        if ids.iter().any(|id| id.as_str().is_empty()) {
            return Err(ApiError::BadRequest("All player IDs are required".to_string()));
        }
        if ids.iter().collect::<HashSet<_>>().len() != ids.len() {
            return Err(ApiError::BadRequest(
                "A player can only appear once per match".to_string(),
            ));
        }

        if self.team1_score > MAX_SCORE || self.team2_score > MAX_SCORE {
            return Err(ApiError::BadRequest(format!(
                "Scores must be between 0 and {}",
                MAX_SCORE
            )));
        }

        let winner = TeamSide::try_from(self.winning_team)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let (winning_score, losing_score) = match winner {
            TeamSide::Team1 => (self.team1_score, self.team2_score),
            TeamSide::Team2 => (self.team2_score, self.team1_score),
        };
        if winning_score <= losing_score {
            return Err(ApiError::BadRequest(format!(
                "Winning team {} must outscore the losing team ({} vs {})",
                winner, winning_score, losing_score
            )));
        }

        let [t1a, t1b, t2a, t2b]: [PlayerId; 4] = ids
            .try_into()
            .map_err(|_| ApiError::Internal("expected four player IDs".to_string()))?;

        Ok(Match::new(
            self.date.unwrap_or_else(Utc::now),
            [t1a, t1b],
            [t2a, t2b],
            self.team1_score,
            self.team2_score,
            winner,
        ))
    }
}

pub async fn create_match(
    State(state): State<AppState>,
    Json(req): Json<NewMatchRequest>,
) -> Result<(StatusCode, Json<MatchRecord>), ApiError> {
    let m = req.into_match()?;

    for id in m.player_ids() {
        match state.repo.get_player(id).await? {
            None => return Err(ApiError::BadRequest(format!("Unknown player {}", id))),
            Some(p) if p.archived => {
                return Err(ApiError::BadRequest(format!(
                    "Player {} is archived",
                    p.name
                )))
            }
            Some(_) => {}
        }
    }

    let record = state.repo.create_match(m).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
