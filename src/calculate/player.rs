//! Per-player aggregation.

use crate::models::{CurrentStreak, MatchRecord, Outcome, PlayerId, PlayerStatSnapshot, Record};

use super::{calculate_win_rate, RECENT_WINDOW};

/// Compute a player's snapshot from their matches, newest first.
///
/// Matches in which the player is not on exactly one team are ignored.
pub fn compute_player_stats(player_id: &PlayerId, matches: &[MatchRecord]) -> PlayerStatSnapshot {
    let mut overall = Record::default();
    let mut last10 = Record::default();
    let mut streak = CurrentStreak::None;
    let mut streak_broken = false;
    let mut points_scored: u64 = 0;
    let mut points_conceded: u64 = 0;

    let played = matches
        .iter()
        .filter_map(|m| m.side_of(player_id).map(|side| (m, side)));

    for (i, (m, side)) in played.enumerate() {
        let outcome = Outcome::from_won(m.won_by(side));

        overall.add(outcome);
        if i < RECENT_WINDOW {
            last10.add(outcome);
        }

        points_scored = points_scored.saturating_add(u64::from(m.team(side).score()));
        points_conceded =
            points_conceded.saturating_add(u64::from(m.team(side.opponent()).score()));

        if !streak_broken {
            streak = match streak {
                CurrentStreak::None => CurrentStreak::Run { outcome, length: 1 },
                CurrentStreak::Run {
                    outcome: current,
                    length,
                } if current == outcome => CurrentStreak::Run {
                    outcome,
                    length: length + 1,
                },
                run => {
                    streak_broken = true;
                    run
                }
            };
        }
    }

    PlayerStatSnapshot {
        total_matches: overall.total(),
        wins: overall.wins,
        losses: overall.losses,
        win_rate: calculate_win_rate(overall.wins, overall.total()),
        points_scored,
        points_conceded,
        last10_record: last10,
        current_streak: streak,
    }
}
