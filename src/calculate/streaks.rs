//! Current team win streaks.
//!
//! Matches are scanned newest first. A pairing's streak grows with each win
//! while it is active. Its first loss marks it inactive and it is never
//! reconsidered. Only pairings still active at the end of the scan with a
//! non-zero count are reported.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{team_key, MatchRecord, PlayerRef, TeamSide, TeamStreak};

use super::TEAM_STREAK_LIMIT;

struct StreakState {
    players: [PlayerRef; 2],
    streak: u32,
    last_win_date: Option<DateTime<Utc>>,
    active: bool,
}

/// Top current team win streaks over all matches, newest first.
pub fn compute_team_streaks(matches: &[MatchRecord]) -> Vec<TeamStreak> {
    let mut teams: HashMap<String, StreakState> = HashMap::new();

    for m in matches {
        for side in [TeamSide::Team1, TeamSide::Team2] {
            let Some((a, b)) = m.team(side).members() else {
                continue;
            };

            let state = teams
                .entry(team_key(&a.id, &b.id))
                .or_insert_with(|| StreakState {
                    players: if a.id <= b.id {
                        [a.clone(), b.clone()]
                    } else {
                        [b.clone(), a.clone()]
                    },
                    streak: 0,
                    last_win_date: None,
                    active: true,
                });

            if !state.active {
                continue;
            }

            if m.won_by(side) {
                if state.streak == 0 {
                    state.last_win_date = Some(m.date);
                }
                state.streak += 1;
            } else {
                state.active = false;
            }
        }
    }

    let mut streaks: Vec<TeamStreak> = teams
        .into_iter()
        .filter(|(_, s)| s.active && s.streak > 0)
        .filter_map(|(key, s)| {
            s.last_win_date.map(|last_win_date| TeamStreak {
                key,
                players: s.players,
                streak: s.streak,
                last_win_date,
                active: s.active,
            })
        })
        .collect();

    streaks.sort_by(|a, b| {
        b.streak
            .cmp(&a.streak)
            .then_with(|| b.last_win_date.cmp(&a.last_win_date))
            .then_with(|| a.key.cmp(&b.key))
    });
    streaks.truncate(TEAM_STREAK_LIMIT);
    streaks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::fixtures::{day, game, newest_first};

    #[test]
    fn test_two_wins_streak() {
        let matches = newest_first(vec![
            game(2, ["a", "b"], ["x", "y"], 1),
            game(1, ["b", "a"], ["x", "y"], 1),
        ]);

        let streaks = compute_team_streaks(&matches);

        assert_eq!(streaks.len(), 1);
        assert_eq!(streaks[0].key, "a-b");
        assert_eq!(streaks[0].streak, 2);
        assert!(streaks[0].active);
        assert_eq!(streaks[0].last_win_date, day(2));
    }

    #[test]
    fn test_loss_deactivates_pairing() {
        let matches = newest_first(vec![
            game(5, ["a", "b"], ["x", "y"], 1),
            game(4, ["a", "b"], ["x", "y"], 1),
            game(3, ["a", "b"], ["x", "y"], 2),
            // Older wins must not resume the inactive record
            game(2, ["a", "b"], ["x", "y"], 1),
            game(1, ["a", "b"], ["x", "y"], 1),
            game(0, ["c", "d"], ["q", "r"], 1),
        ]);

        let streaks = compute_team_streaks(&matches);

        assert!(streaks.iter().all(|s| s.key != "a-b"));
        assert!(streaks.iter().all(|s| s.key != "x-y"));
        assert_eq!(streaks.len(), 1);
        assert_eq!(streaks[0].key, "c-d");
        assert!(streaks.iter().all(|s| s.active && s.streak > 0));
    }

    #[test]
    fn test_most_recent_loss_means_no_streak() {
        let matches = newest_first(vec![
            game(2, ["a", "b"], ["x", "y"], 2),
            game(1, ["a", "b"], ["x", "y"], 1),
        ]);

        let streaks = compute_team_streaks(&matches);

        // a-b lost most recently; x-y won then hit its loss on day 1
        assert!(streaks.is_empty());
    }

    #[test]
    fn test_sorted_and_truncated() {
        let matches = newest_first(vec![
            game(10, ["a", "b"], ["q", "r"], 1),
            game(9, ["a", "b"], ["q", "r"], 1),
            game(8, ["a", "b"], ["q", "r"], 1),
            game(7, ["c", "d"], ["q", "r"], 1),
            game(6, ["c", "d"], ["q", "r"], 1),
            game(5, ["e", "f"], ["s", "t"], 1),
            game(4, ["g", "h"], ["s", "t"], 1),
        ]);

        let streaks = compute_team_streaks(&matches);

        assert_eq!(streaks.len(), 3);
        assert_eq!(streaks[0].key, "a-b");
        assert_eq!(streaks[0].streak, 3);
        assert_eq!(streaks[1].key, "c-d");
        // e-f and g-h tie on 1; the more recent win ranks first
        assert_eq!(streaks[2].key, "e-f");
    }

    #[test]
    fn test_pairing_that_lost_is_not_reported() {
        let matches = newest_first(vec![
            game(3, ["a", "b"], ["x", "y"], 1),
            game(2, ["a", "b"], ["x", "y"], 1),
            game(1, ["a", "b"], ["x", "y"], 2),
        ]);

        let streaks = compute_team_streaks(&matches);

        // a-b hit a loss on day 1; x-y lost on days 3 and 2
        assert!(streaks.is_empty());
    }

    #[test]
    fn test_team_with_empty_slot_skipped() {
        let mut m = game(1, ["a", "b"], ["x", "y"], 1);
        m.team1.player_b = None;

        let streaks = compute_team_streaks(&[m]);

        assert!(streaks.is_empty());
    }

    #[test]
    fn test_no_matches() {
        assert!(compute_team_streaks(&[]).is_empty());
    }
}
