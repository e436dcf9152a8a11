//! Route handlers grouped by resource.

pub mod matches;
pub mod players;
pub mod stats;

use crate::api::ApiError;
use crate::models::{Player, PlayerId};
use crate::storage::Repository;

/// Fetch a player or fail with 404.
pub(crate) async fn require_player(repo: &dyn Repository, id: &PlayerId) -> Result<Player, ApiError> {
    repo.get_player(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Player {} not found", id)))
}
