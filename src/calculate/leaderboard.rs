//! Active-player leaderboard.

use std::cmp::Ordering;

use crate::models::{LeaderboardEntry, MatchRecord, Player};

use super::compute_player_stats;

/// Stats for every non-archived player, best first.
///
/// Players who have played rank by win rate, then wins, then name; players
/// without matches follow, by name.
pub fn compute_leaderboard(players: &[Player], matches: &[MatchRecord]) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = players
        .iter()
        .filter(|p| !p.archived)
        .map(|p| LeaderboardEntry {
            player: p.to_ref(),
            stats: compute_player_stats(&p.id, matches),
        })
        .collect();

    entries.sort_by(|a, b| {
        let a_played = a.stats.total_matches > 0;
        let b_played = b.stats.total_matches > 0;
        b_played
            .cmp(&a_played)
            .then_with(|| {
                b.stats
                    .win_rate
                    .partial_cmp(&a.stats.win_rate)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| b.stats.wins.cmp(&a.stats.wins))
            .then_with(|| a.player.name.cmp(&b.player.name))
    });

    entries
}
