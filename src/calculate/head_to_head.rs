//! Head-to-head record between two players.

use crate::models::{HeadToHead, MatchRecord, PlayerId};

use super::HEAD_TO_HEAD_RECENT;

/// Summarise the matches in which `a` and `b` played on opposite teams.
pub fn compute_head_to_head(a: &PlayerId, b: &PlayerId, matches: &[MatchRecord]) -> HeadToHead {
    let mut summary = HeadToHead {
        player_a: a.clone(),
        player_b: b.clone(),
        meetings: 0,
        player_a_wins: 0,
        player_b_wins: 0,
        recent: Vec::new(),
    };

    for m in matches {
        let (Some(side_a), Some(side_b)) = (m.side_of(a), m.side_of(b)) else {
            continue;
        };
        if side_a == side_b {
            continue;
        }

        summary.meetings += 1;
        if m.won_by(side_a) {
            summary.player_a_wins += 1;
        } else {
            summary.player_b_wins += 1;
        }
        if summary.recent.len() < HEAD_TO_HEAD_RECENT {
            summary.recent.push(m.clone());
        }
    }

    summary
}
