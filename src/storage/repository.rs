//! Data access for players and matches.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{JsonlFile, StorageConfig, StorageError};
use crate::models::{Match, MatchRecord, Player, PlayerId, PlayerRef};

/// Trait for the store behind the API and CLI.
///
/// Match lists are always returned newest first with player slots resolved,
/// ready to hand to the statistics engine.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn list_players(&self) -> Result<Vec<Player>, StorageError>;

    async fn get_player(&self, id: &PlayerId) -> Result<Option<Player>, StorageError>;

    async fn create_player(&self, player: Player) -> Result<Player, StorageError>;

    /// Replace a stored player by ID.
    async fn update_player(&self, player: Player) -> Result<Player, StorageError>;

    async fn create_match(&self, m: Match) -> Result<MatchRecord, StorageError>;

    async fn list_matches(&self) -> Result<Vec<MatchRecord>, StorageError>;

    async fn matches_for_player(&self, id: &PlayerId) -> Result<Vec<MatchRecord>, StorageError>;

    /// Delete every stored match, returning how many were removed.
    async fn clear_matches(&self) -> Result<usize, StorageError>;
}

/// JSONL-backed repository.
///
/// Writes are serialized through a mutex; reads go straight to disk.
pub struct JsonlRepository {
    config: StorageConfig,
    write_lock: Mutex<()>,
}

impl JsonlRepository {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    fn player_file(&self) -> JsonlFile<Player> {
        JsonlFile::in_dir(&self.config)
    }

    fn match_file(&self) -> JsonlFile<Match> {
        JsonlFile::in_dir(&self.config)
    }

    fn players(&self) -> Result<Vec<Player>, StorageError> {
        self.player_file().load()
    }

    fn player_refs(&self) -> Result<HashMap<PlayerId, PlayerRef>, StorageError> {
        Ok(self
            .players()?
            .iter()
            .map(|p| (p.id.clone(), p.to_ref()))
            .collect())
    }

    fn hydrate_newest_first(
        &self,
        matches: Vec<Match>,
    ) -> Result<Vec<MatchRecord>, StorageError> {
        let refs = self.player_refs()?;
        let mut records: Vec<MatchRecord> = matches
            .iter()
            .map(|m| m.hydrate(|id| refs.get(id).cloned()))
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}

#[async_trait]
impl Repository for JsonlRepository {
    async fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        self.players()
    }

    async fn get_player(&self, id: &PlayerId) -> Result<Option<Player>, StorageError> {
        Ok(self.players()?.into_iter().find(|p| &p.id == id))
    }

    async fn create_player(&self, player: Player) -> Result<Player, StorageError> {
        let _guard = self.write_lock.lock().await;

        let file = self.player_file();
        if file.contains(&player.id)? {
            return Err(StorageError::Duplicate(format!("player {}", player.id)));
        }

        file.append(&player)?;
        info!("Created player {} ({})", player.name, player.id);
        Ok(player)
    }

    async fn update_player(&self, player: Player) -> Result<Player, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut players = self.players()?;
        let slot = players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or_else(|| StorageError::NotFound(format!("player {}", player.id)))?;
        *slot = player.clone();

        self.player_file().replace(&players)?;
        info!("Updated player {}", player.id);
        Ok(player)
    }

    async fn create_match(&self, m: Match) -> Result<MatchRecord, StorageError> {
        let _guard = self.write_lock.lock().await;

        let file = self.match_file();
        if file.contains(&m.id)? {
            return Err(StorageError::Duplicate(format!("match {}", m.id)));
        }

        file.append(&m)?;
        info!("Recorded match {} (team {} won)", m.id, m.winning_team);

        let refs = self.player_refs()?;
        Ok(m.hydrate(|id| refs.get(id).cloned()))
    }

    async fn list_matches(&self) -> Result<Vec<MatchRecord>, StorageError> {
        let matches = self.match_file().load()?;
        self.hydrate_newest_first(matches)
    }

    async fn matches_for_player(&self, id: &PlayerId) -> Result<Vec<MatchRecord>, StorageError> {
        let matches = self.match_file().load_where(|m| m.involves(id))?;
        debug!("Found {} matches for player {}", matches.len(), id);
        self.hydrate_newest_first(matches)
    }

    async fn clear_matches(&self) -> Result<usize, StorageError> {
        let _guard = self.write_lock.lock().await;

        let file = self.match_file();
        let count = file.load()?.len();
        file.replace(&[])?;
        info!("Cleared {} matches", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamSide;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn repo(dir: &TempDir) -> JsonlRepository {
        JsonlRepository::new(StorageConfig::new(dir.path().to_path_buf()))
    }

    async fn roster(repo: &JsonlRepository) -> Vec<Player> {
        let mut players = Vec::new();
        for name in ["Larry", "Zach", "Dustin", "Phil", "Jenna"] {
            players.push(repo.create_player(Player::new(name.to_string())).await.unwrap());
        }
        players
    }

    fn game(day: i64, players: &[Player], idx: [usize; 4], winner: TeamSide) -> Match {
        Match::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap() + Duration::days(day),
            [players[idx[0]].id.clone(), players[idx[1]].id.clone()],
            [players[idx[2]].id.clone(), players[idx[3]].id.clone()],
            11,
            8,
            winner,
        )
    }

    #[tokio::test]
    async fn test_create_and_get_player() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        let created = repo.create_player(Player::new("Larry".to_string())).await.unwrap();
        let fetched = repo.get_player(&created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
        assert_eq!(repo.list_players().await.unwrap().len(), 1);
        assert!(repo.get_player(&"missing".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_player_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        let player = Player::new("Larry".to_string());
        repo.create_player(player.clone()).await.unwrap();
        let err = repo.create_player(player).await.unwrap_err();

        assert!(matches!(err, StorageError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_player() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let players = roster(&repo).await;

        let mut phil = players[3].clone();
        phil.name = "Phil Farley".to_string();
        phil.archived = true;
        repo.update_player(phil.clone()).await.unwrap();

        let all = repo.list_players().await.unwrap();
        let stored = repo.get_player(&phil.id).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(stored, Some(phil));
    }

    #[tokio::test]
    async fn test_update_missing_player() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        let err = repo
            .update_player(Player::new("Ghost".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_matches_newest_first_and_hydrated() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let players = roster(&repo).await;

        repo.create_match(game(1, &players, [0, 1, 2, 3], TeamSide::Team1))
            .await
            .unwrap();
        repo.create_match(game(3, &players, [0, 2, 1, 4], TeamSide::Team2))
            .await
            .unwrap();
        repo.create_match(game(2, &players, [1, 2, 3, 4], TeamSide::Team1))
            .await
            .unwrap();

        let all = repo.list_matches().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(
            all[0].team1.player_a.as_ref().map(|p| p.name.as_str()),
            Some("Larry")
        );

        let larrys = repo.matches_for_player(&players[0].id).await.unwrap();
        assert_eq!(larrys.len(), 2);
        assert!(larrys[0].date > larrys[1].date);
    }

    #[tokio::test]
    async fn test_duplicate_match_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let players = roster(&repo).await;

        let m = game(1, &players, [0, 1, 2, 3], TeamSide::Team1);
        repo.create_match(m.clone()).await.unwrap();
        let err = repo.create_match(m).await.unwrap_err();

        assert!(matches!(err, StorageError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_unknown_player_hydrates_to_empty_slot() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let players = roster(&repo).await;

        let mut m = game(1, &players, [0, 1, 2, 3], TeamSide::Team1);
        m.team2_player_b_id = "deleted-player".into();
        let record = repo.create_match(m).await.unwrap();

        assert!(record.team2.player_b.is_none());
        assert!(record.team2.player_a.is_some());
    }

    #[tokio::test]
    async fn test_clear_matches() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let players = roster(&repo).await;

        repo.create_match(game(1, &players, [0, 1, 2, 3], TeamSide::Team1))
            .await
            .unwrap();
        repo.create_match(game(2, &players, [0, 1, 2, 3], TeamSide::Team2))
            .await
            .unwrap();

        assert_eq!(repo.clear_matches().await.unwrap(), 2);
        assert!(repo.list_matches().await.unwrap().is_empty());
        assert_eq!(repo.list_players().await.unwrap().len(), 5);
    }
}
