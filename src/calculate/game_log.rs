//! One member's games for one season, in schedule order.

use serde::Serialize;

use crate::models::{GameResult, MemberId, Outcome, Season, TeamSeasonEntry};
use crate::names::{MemberNames, UNKNOWN_MEMBER};

use super::week::compare_weeks;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLogEntry {
    pub week: Option<String>,
    #[serde(with = "crate::models::wire::outcome_code")]
    pub result: Option<Outcome>,
    pub points_for: i64,
    pub points_against: i64,
    pub opponent_id: MemberId,
    /// Opponent's display name, or "Unknown".
    pub opponent: String,
    /// Opponent's team name that season, if they had a team entry.
    pub opponent_team: Option<String>,
}

/// Build the game log for `member_id` in `year`, ordered by week.
///
/// An opponent is only named when they have a team entry for the same season.
pub fn game_log(
    games: &[GameResult],
    team_entries: &[TeamSeasonEntry],
    names: &MemberNames,
    member_id: MemberId,
    year: Season,
) -> Vec<GameLogEntry> {
    let mut member_games: Vec<&GameResult> = games
        .iter()
        .filter(|g| g.member_id == member_id && g.year == year)
        .collect();
    member_games.sort_by(|a, b| compare_weeks(a.week.as_deref(), b.week.as_deref()));

    member_games
        .into_iter()
        .map(|game| {
            let opponent_team = team_entries
                .iter()
                .find(|t| t.member_id == game.opponent_id && t.year == year);
            let opponent = match opponent_team {
                Some(_) => names.resolve(game.opponent_id),
                None => UNKNOWN_MEMBER,
            };

            GameLogEntry {
                week: game.week.clone(),
                result: game.outcome,
                points_for: game.points_for,
                points_against: game.points_against,
                opponent_id: game.opponent_id,
                opponent: opponent.to_string(),
                opponent_team: opponent_team.map(|t| t.team_name.clone()),
            }
        })
        .collect()
}
