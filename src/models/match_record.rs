//! Match models.
//!
//! [`Match`] is the stored row: four player IDs, four scores and the
//! winning side. [`MatchRecord`] is the same match with each slot resolved
//! to a [`PlayerRef`], which is what the statistics engine consumes. A slot
//! whose player no longer exists resolves to `None`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{team_key, EntityId, MatchId, PlayerId, PlayerRef};

/// Which side of the net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Team1 => TeamSide::Team2,
            TeamSide::Team2 => TeamSide::Team1,
        }
    }
}

#[derive(Debug, Error)]
#[error("winning team must be 1 or 2, got {0}")]
pub struct InvalidTeamSide(pub u8);

impl TryFrom<u8> for TeamSide {
    type Error = InvalidTeamSide;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TeamSide::Team1),
            2 => Ok(TeamSide::Team2),
            other => Err(InvalidTeamSide(other)),
        }
    }
}

impl From<TeamSide> for u8 {
    fn from(side: TeamSide) -> Self {
        match side {
            TeamSide::Team1 => 1,
            TeamSide::Team2 => 2,
        }
    }
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// A stored doubles match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Content-derived identifier
    pub id: MatchId,

    /// When the match was played
    pub date: DateTime<Utc>,

    pub team1_player_a_id: PlayerId,
    pub team1_player_b_id: PlayerId,
    pub team2_player_a_id: PlayerId,
    pub team2_player_b_id: PlayerId,

    pub team1_score_a: u32,
    pub team1_score_b: u32,
    pub team2_score_a: u32,
    pub team2_score_b: u32,

    pub winning_team: TeamSide,
}

impl Match {
    /// Create a match with a single score per team; both player slots on a
    /// team record the same value.
    pub fn new(
        date: DateTime<Utc>,
        team1: [PlayerId; 2],
        team2: [PlayerId; 2],
        team1_score: u32,
        team2_score: u32,
        winning_team: TeamSide,
    ) -> Self {
        let [t1a, t1b] = team1;
        let [t2a, t2b] = team2;
        let played_at = date.to_rfc3339_opts(SecondsFormat::Millis, true);
        let id = EntityId::digest([
            played_at.as_str(),
            t1a.as_str(),
            t1b.as_str(),
            t2a.as_str(),
            t2b.as_str(),
        ]);

        Self {
            id,
            date,
            team1_player_a_id: t1a,
            team1_player_b_id: t1b,
            team2_player_a_id: t2a,
            team2_player_b_id: t2b,
            team1_score_a: team1_score,
            team1_score_b: team1_score,
            team2_score_a: team2_score,
            team2_score_b: team2_score,
            winning_team,
        }
    }

    /// All four player IDs in slot order.
    pub fn player_ids(&self) -> [&PlayerId; 4] {
        [
            &self.team1_player_a_id,
            &self.team1_player_b_id,
            &self.team2_player_a_id,
            &self.team2_player_b_id,
        ]
    }

    pub fn involves(&self, player_id: &PlayerId) -> bool {
        self.player_ids().contains(&player_id)
    }

    /// Resolve player slots using `lookup`; unknown IDs become empty slots.
    pub fn hydrate<F>(&self, lookup: F) -> MatchRecord
    where
        F: Fn(&PlayerId) -> Option<PlayerRef>,
    {
        MatchRecord {
            id: self.id.clone(),
            date: self.date,
            team1: TeamRecord {
                player_a: lookup(&self.team1_player_a_id),
                player_b: lookup(&self.team1_player_b_id),
                score_a: self.team1_score_a,
                score_b: self.team1_score_b,
            },
            team2: TeamRecord {
                player_a: lookup(&self.team2_player_a_id),
                player_b: lookup(&self.team2_player_b_id),
                score_a: self.team2_score_a,
                score_b: self.team2_score_b,
            },
            winning_team: self.winning_team,
        }
    }
}

/// One side of a hydrated match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub player_a: Option<PlayerRef>,
    pub player_b: Option<PlayerRef>,
    pub score_a: u32,
    pub score_b: u32,
}

impl TeamRecord {
    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.slots().any(|p| &p.id == player_id)
    }

    /// Points the team scored. Both slots normally carry the same value;
    /// the larger one wins when a slot was left at zero.
    pub fn score(&self) -> u32 {
        self.score_a.max(self.score_b)
    }

    /// The other player on this team, if `player_id` is on it and the
    /// other slot is filled.
    pub fn teammate_of(&self, player_id: &PlayerId) -> Option<&PlayerRef> {
        match (&self.player_a, &self.player_b) {
            (Some(a), b) if &a.id == player_id => b.as_ref(),
            (a, Some(b)) if &b.id == player_id => a.as_ref(),
            _ => None,
        }
    }

    /// Both players, or `None` when either slot is empty.
    pub fn members(&self) -> Option<(&PlayerRef, &PlayerRef)> {
        match (&self.player_a, &self.player_b) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Canonical key for this pairing, when both slots are filled.
    pub fn key(&self) -> Option<String> {
        self.members().map(|(a, b)| team_key(&a.id, &b.id))
    }

    fn slots(&self) -> impl Iterator<Item = &PlayerRef> {
        self.player_a.iter().chain(self.player_b.iter())
    }
}

/// A match with player references resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: MatchId,
    pub date: DateTime<Utc>,
    pub team1: TeamRecord,
    pub team2: TeamRecord,
    pub winning_team: TeamSide,
}

impl MatchRecord {
    pub fn team(&self, side: TeamSide) -> &TeamRecord {
        match side {
            TeamSide::Team1 => &self.team1,
            TeamSide::Team2 => &self.team2,
        }
    }

    /// The side `player_id` played on. `None` if the player is on neither
    /// team, or (ill-formed) on both.
    pub fn side_of(&self, player_id: &PlayerId) -> Option<TeamSide> {
        match (self.team1.contains(player_id), self.team2.contains(player_id)) {
            (true, false) => Some(TeamSide::Team1),
            (false, true) => Some(TeamSide::Team2),
            _ => None,
        }
    }

    pub fn won_by(&self, side: TeamSide) -> bool {
        self.winning_team == side
    }

    pub fn involves(&self, player_id: &PlayerId) -> bool {
        self.team1.contains(player_id) || self.team2.contains(player_id)
    }
}
