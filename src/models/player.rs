//! Player model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{EntityId, PlayerId};

const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// A registered player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Unique identifier
    pub id: PlayerId,

    /// Display name
    pub name: String,

    /// Avatar URL
    pub profile_picture: String,

    /// Archived players are hidden from rosters and leaderboards
    #[serde(default)]
    pub archived: bool,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new active player with a random ID and a generated avatar.
    pub fn new(name: String) -> Self {
        let profile_picture = default_avatar_url(&name);
        Self {
            id: EntityId::random(),
            name,
            profile_picture,
            archived: false,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set an explicit avatar.
    pub fn with_profile_picture(mut self, url: String) -> Self {
        self.profile_picture = url;
        self
    }

    /// Minimal reference embedded in match records and stats.
    pub fn to_ref(&self) -> PlayerRef {
        PlayerRef {
            id: self.id.clone(),
            name: self.name.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }
}

/// Minimal player reference: id, name, avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
    pub profile_picture: String,
}

/// Generated initials avatar for players without an uploaded picture.
pub fn default_avatar_url(name: &str) -> String {
    match Url::parse_with_params(
        AVATAR_SERVICE,
        &[("name", name), ("background", "random"), ("size", "200")],
    ) {
        Ok(url) => url.to_string(),
        Err(_) => AVATAR_SERVICE.to_string(),
    }
}
