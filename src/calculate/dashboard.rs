//! League-wide totals shown on the dashboard.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{ChampionEntry, GameResult, TeamSeasonEntry, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueTotals {
    /// Distinct members that ever fielded a team.
    pub total_teams: usize,
    /// Games played; each game is stored once per participant.
    pub total_games_played: usize,
    pub total_championships: usize,
    /// Every counted roster move on every transaction row.
    pub total_transactions: u64,
}

pub fn league_totals(
    team_entries: &[TeamSeasonEntry],
    games: &[GameResult],
    champions: &[ChampionEntry],
    transactions: &[Transaction],
) -> LeagueTotals {
    let members: HashSet<_> = team_entries.iter().map(|t| t.member_id).collect();

    LeagueTotals {
        total_teams: members.len(),
        total_games_played: games.len().div_ceil(2),
        total_championships: champions.len(),
        total_transactions: transactions.iter().map(Transaction::total).sum(),
    }
}
