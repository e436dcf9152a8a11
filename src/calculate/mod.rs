//! Statistics calculation engine.
//!
//! Pure functions over already-fetched match records:
//! - Per-player win/loss, points, last-10 record and current streak
//! - Common partners, top opponents and top opponent teams
//! - Current team win streaks across all matches
//! - Head-to-head records and the active-player leaderboard
//!
//! Every function expects matches ordered newest first. Malformed matches
//! (player on neither team, empty slots) are skipped for the computation
//! they would corrupt; nothing here fails.

mod head_to_head;
mod leaderboard;
mod player;
mod rankings;
mod streaks;

pub use head_to_head::compute_head_to_head;
pub use leaderboard::compute_leaderboard;
pub use player::compute_player_stats;
pub use rankings::compute_rankings;
pub use streaks::compute_team_streaks;

/// Entries kept per ranking (partners, opponents, opponent teams).
pub const RANKING_LIMIT: usize = 3;

/// Number of most recent matches in the last-N record.
pub const RECENT_WINDOW: usize = 10;

/// Team streaks reported on the global leaderboard.
pub const TEAM_STREAK_LIMIT: usize = 3;

/// Recent meetings included in a head-to-head summary.
pub const HEAD_TO_HEAD_RECENT: usize = 5;

/// Win rate on a 0-100 scale; zero when no matches were played.
pub fn calculate_win_rate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * wins as f64 / total as f64
    }
}

/// Win percentage rounded to one decimal place.
pub fn win_percentage(wins: u32, matches: u32) -> f64 {
    if matches == 0 {
        0.0
    } else {
        (wins as f64 / matches as f64 * 1000.0).round() / 10.0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders shared by the engine tests.

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::models::{EntityId, MatchRecord, PlayerRef, TeamRecord, TeamSide};

    pub fn pref(id: &str) -> PlayerRef {
        PlayerRef {
            id: EntityId::from(id),
            name: id.to_uppercase(),
            profile_picture: format!("/players/{}.png", id),
        }
    }

    /// Day `n` after a fixed epoch; larger `n` is more recent.
    pub fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
    }

    /// A complete match `t1` vs `t2` on `day(n)`.
    pub fn game(n: i64, t1: [&str; 2], t2: [&str; 2], winner: u8) -> MatchRecord {
        let (s1, s2) = if winner == 1 { (11, 7) } else { (6, 11) };
        MatchRecord {
            id: EntityId::from(format!("m{}-{}{}{}{}", n, t1[0], t1[1], t2[0], t2[1])),
            date: day(n),
            team1: TeamRecord {
                player_a: Some(pref(t1[0])),
                player_b: Some(pref(t1[1])),
                score_a: s1,
                score_b: s1,
            },
            team2: TeamRecord {
                player_a: Some(pref(t2[0])),
                player_b: Some(pref(t2[1])),
                score_a: s2,
                score_b: s2,
            },
            winning_team: TeamSide::try_from(winner).unwrap(),
        }
    }

    /// Sort newest first, the order every engine function expects.
    pub fn newest_first(mut matches: Vec<MatchRecord>) -> Vec<MatchRecord> {
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        matches
    }
}
