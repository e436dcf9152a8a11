//! Derived statistics models.
//!
//! None of these are stored; they are recomputed from matches on request.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::{MatchRecord, PlayerId, PlayerRef};

/// Result of a single match from one player's or team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn from_won(won: bool) -> Self {
        if won {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    pub fn tag(self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Loss => 'L',
        }
    }
}

/// Run of identical outcomes counted back from the most recent match.
///
/// Rendered as `W4` / `L2`, or `None` before any match has been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrentStreak {
    #[default]
    None,
    Run { outcome: Outcome, length: u32 },
}

impl CurrentStreak {
    pub fn length(&self) -> u32 {
        match self {
            CurrentStreak::None => 0,
            CurrentStreak::Run { length, .. } => *length,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            CurrentStreak::None => None,
            CurrentStreak::Run { outcome, .. } => Some(*outcome),
        }
    }
}

impl std::fmt::Display for CurrentStreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrentStreak::None => write!(f, "None"),
            CurrentStreak::Run { outcome, length } => write!(f, "{}{}", outcome.tag(), length),
        }
    }
}

impl Serialize for CurrentStreak {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Win-loss tally, rendered as `W-L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
}

impl Record {
    pub fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-player statistics computed from that player's matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatSnapshot {
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,

    /// Win rate (0.0 to 100.0)
    pub win_rate: f64,

    pub points_scored: u64,
    pub points_conceded: u64,

    /// Record over the ten most recent matches
    pub last10_record: Record,

    pub current_streak: CurrentStreak,
}

/// Tally against (or alongside) one other player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterpartStat {
    pub player: PlayerRef,
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,

    /// Win percentage rounded to one decimal
    pub win_percentage: f64,
}

/// Tally against one specific opposing pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentTeamStat {
    /// Canonical team key (sorted player IDs)
    pub key: String,
    pub players: [PlayerRef; 2],
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_percentage: f64,
}

/// Partner and opponent rankings for one player, top three of each.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub common_partners: Vec<CounterpartStat>,
    pub top_opponents: Vec<CounterpartStat>,
    pub top_opponent_teams: Vec<OpponentTeamStat>,
}

/// Current unbroken win streak for a pairing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStreak {
    pub key: String,
    pub players: [PlayerRef; 2],
    pub streak: u32,
    pub last_win_date: DateTime<Utc>,
    pub active: bool,
}

/// Meetings between two players on opposite sides of the net.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHead {
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub meetings: u32,
    pub player_a_wins: u32,
    pub player_b_wins: u32,

    /// Most recent meetings, newest first
    pub recent: Vec<MatchRecord>,
}

/// One row of the active-player leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player: PlayerRef,
    pub stats: PlayerStatSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_display() {
        assert_eq!(CurrentStreak::None.to_string(), "None");
        let run = CurrentStreak::Run {
            outcome: Outcome::Win,
            length: 4,
        };
        assert_eq!(run.to_string(), "W4");
        let run = CurrentStreak::Run {
            outcome: Outcome::Loss,
            length: 2,
        };
        assert_eq!(run.to_string(), "L2");
        assert_eq!(run.length(), 2);
        assert_eq!(run.outcome(), Some(Outcome::Loss));
    }

    #[test]
    fn test_record_display_and_add() {
        let mut record = Record::default();
        assert_eq!(record.to_string(), "0-0");
        record.add(Outcome::Win);
        record.add(Outcome::Win);
        record.add(Outcome::Loss);
        assert_eq!(record.to_string(), "2-1");
        assert_eq!(record.total(), 3);
    }

    #[test]
    fn test_snapshot_serializes_strings() {
        let snapshot = PlayerStatSnapshot {
            total_matches: 3,
            wins: 2,
            losses: 1,
            win_rate: 66.7,
            points_scored: 30,
            points_conceded: 25,
            last10_record: Record { wins: 2, losses: 1 },
            current_streak: CurrentStreak::Run {
                outcome: Outcome::Win,
                length: 2,
            },
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["last10Record"], "2-1");
        assert_eq!(json["currentStreak"], "W2");
        assert_eq!(json["totalMatches"], 3);
        assert_eq!(json["pointsConceded"], 25);
    }

    #[test]
    fn test_default_snapshot() {
        let snapshot = PlayerStatSnapshot::default();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["currentStreak"], "None");
        assert_eq!(json["last10Record"], "0-0");
        assert_eq!(json["winRate"], 0.0);
    }
}
