//! Demo roster seeding.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::Player;
use crate::storage::{Repository, StorageError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read roster file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse roster: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Players to create, usually read from a TOML file:
///
/// ```toml
/// [[players]]
/// name = "Larry"
/// profile_picture = "https://example.com/larry.png"  # optional
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Roster {
    pub players: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub profile_picture: Option<String>,
}

impl Default for Roster {
    fn default() -> Self {
        let names = ["Larry", "Zach", "Dustin", "Phil", "Jared", "Jenna"];
        Self {
            players: names
                .iter()
                .map(|name| RosterEntry {
                    name: name.to_string(),
                    profile_picture: None,
                })
                .collect(),
        }
    }
}

impl Roster {
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Create the roster's players.
///
/// Does nothing when players already exist unless `force` is set, in which
/// case entries whose name is already taken are skipped.
pub async fn seed_players(
    repo: &dyn Repository,
    roster: &Roster,
    force: bool,
) -> Result<Vec<Player>, SeedError> {
    let existing = repo.list_players().await?;
    if !existing.is_empty() && !force {
        info!(
            "Skipping seed: {} players already exist (use --force to add)",
            existing.len()
        );
        return Ok(Vec::new());
    }

    let mut created = Vec::new();
    for entry in &roster.players {
        let name = entry.name.trim();
        if name.is_empty()
            || existing
                .iter()
                .chain(created.iter())
                .any(|p: &Player| p.name.eq_ignore_ascii_case(name))
        {
            continue;
        }

        let mut player = Player::new(name.to_string());
        if let Some(ref url) = entry.profile_picture {
            player = player.with_profile_picture(url.clone());
        }
        created.push(repo.create_player(player).await?);
    }

    info!("Seeded {} players", created.len());
    Ok(created)
}
