//! Common partners, top opponents and top opponent teams.

use std::collections::HashMap;

use crate::models::{
    team_key, CounterpartStat, MatchRecord, OpponentTeamStat, Outcome, PlayerId, PlayerRef,
    Rankings, Record,
};

use super::{win_percentage, RANKING_LIMIT};

/// Insertion-ordered tallies keyed by string, so ties keep first-seen order.
struct Tallies<T> {
    index: HashMap<String, usize>,
    entries: Vec<(T, Record)>,
}

impl<T> Tallies<T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn add<F>(&mut self, key: String, subject: F, outcome: Outcome)
    where
        F: FnOnce() -> T,
    {
        let idx = *self.index.entry(key).or_insert_with(|| {
            self.entries.push((subject(), Record::default()));
            self.entries.len() - 1
        });
        self.entries[idx].1.add(outcome);
    }

    /// Top `n` by matches played; the sort is stable.
    fn top(mut self, n: usize) -> Vec<(T, Record)> {
        self.entries.sort_by(|a, b| b.1.total().cmp(&a.1.total()));
        self.entries.truncate(n);
        self.entries
    }
}

fn counterpart((player, record): (PlayerRef, Record)) -> CounterpartStat {
    CounterpartStat {
        player,
        matches: record.total(),
        wins: record.wins,
        losses: record.losses,
        win_percentage: win_percentage(record.wins, record.total()),
    }
}

/// Rank a player's partners and opponents over their matches.
pub fn compute_rankings(player_id: &PlayerId, matches: &[MatchRecord]) -> Rankings {
    let mut partners: Tallies<PlayerRef> = Tallies::new();
    let mut opponents: Tallies<PlayerRef> = Tallies::new();
    let mut opponent_teams: Tallies<(String, [PlayerRef; 2])> = Tallies::new();

    for m in matches {
        let Some(side) = m.side_of(player_id) else {
            continue;
        };
        let outcome = Outcome::from_won(m.won_by(side));

        if let Some(mate) = m.team(side).teammate_of(player_id) {
            partners.add(mate.id.as_str().to_string(), || mate.clone(), outcome);
        }

        let opposing = m.team(side.opponent());
        for opp in [&opposing.player_a, &opposing.player_b].into_iter().flatten() {
            opponents.add(opp.id.as_str().to_string(), || opp.clone(), outcome);
        }

        if let Some((a, b)) = opposing.members() {
            let key = team_key(&a.id, &b.id);
            let players = if a.id <= b.id {
                [a.clone(), b.clone()]
            } else {
                [b.clone(), a.clone()]
            };
            opponent_teams.add(key.clone(), || (key, players), outcome);
        }
    }

    Rankings {
        common_partners: partners
            .top(RANKING_LIMIT)
            .into_iter()
            .map(counterpart)
            .collect(),
        top_opponents: opponents
            .top(RANKING_LIMIT)
            .into_iter()
            .map(counterpart)
            .collect(),
        top_opponent_teams: opponent_teams
            .top(RANKING_LIMIT)
            .into_iter()
            .map(|((key, players), record)| OpponentTeamStat {
                key,
                players,
                matches: record.total(),
                wins: record.wins,
                losses: record.losses,
                win_percentage: win_percentage(record.wins, record.total()),
            })
            .collect(),
    }
}
