//! Standings aggregation.
//!
//! Turns raw team-season, game and champion rows into one ranked summary per
//! team. Output rows come from team-season entries only; games for members
//! without an entry in scope are ignored.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{
    ActivityStatus, ChampionEntry, GameResult, GameStats, MemberId, Outcome, Scope, Season,
    TeamSeasonEntry, TeamSummary,
};
use crate::names::{MemberNames, UNKNOWN_MEMBER};

use super::format_win_percentage;

/// Build ranked standings for `scope`.
///
/// Rows are sorted by team name (ordinal, stable on input order) and ranked
/// 1..n in that order. Member names are left as "Unknown"; see
/// [`apply_member_names`].
pub fn aggregate(
    team_entries: &[TeamSeasonEntry],
    games: &[GameResult],
    champions: &[ChampionEntry],
    scope: Scope,
) -> Vec<TeamSummary> {
    let mut rows = match scope {
        Scope::AllTime => all_time_rows(team_entries, games, champions),
        Scope::Year(year) => season_rows(team_entries, games, champions, year),
    };

    rows.sort_by(|a, b| a.team_name.cmp(&b.team_name));
    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index as u32 + 1;
    }

    debug!("Aggregated {} teams for scope {}", rows.len(), scope);
    rows
}

/// Fill in display names. Unresolvable members keep the "Unknown" placeholder.
pub fn apply_member_names(rows: &mut [TeamSummary], names: &MemberNames) {
    for row in rows {
        row.member_name = names.resolve(row.member_id).to_string();
    }
}

/// Sum one member's games, optionally restricted to a season.
///
/// Ties are counted but do not enter the win percentage. Rows with no
/// recognised outcome still contribute points.
pub fn accumulate_game_stats(
    games: &[GameResult],
    member_id: MemberId,
    year: Option<Season>,
) -> GameStats {
    let mut stats = GameStats::default();

    for game in games
        .iter()
        .filter(|g| g.member_id == member_id)
        .filter(|g| year.map_or(true, |y| g.year == y))
    {
        stats.games_played += 1;
        stats.points_for += game.points_for;
        stats.points_against += game.points_against;

        match game.outcome {
            Some(Outcome::Win) => stats.wins += 1,
            Some(Outcome::Loss) => stats.losses += 1,
            Some(Outcome::Tie) => stats.ties += 1,
            None => {}
        }
    }

    stats
}

/// Up to two uppercase initials from the words of a team name.
pub fn team_initials(team_name: &str) -> String {
    team_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Distinct seasons present in the team data, newest first.
pub fn available_years(team_entries: &[TeamSeasonEntry]) -> Vec<Season> {
    let mut years: Vec<Season> = team_entries.iter().map(|t| t.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// A member's latest team, found while grouping entries.
struct MemberGroup<'a> {
    member_id: MemberId,
    most_recent_year: Season,
    team_name: &'a str,
}

/// Collapse entries to one group per member, in first-appearance order.
///
/// The latest year's name wins; when a member has two entries for that year
/// the earlier one in input order is kept.
fn group_by_member(team_entries: &[TeamSeasonEntry]) -> Vec<MemberGroup<'_>> {
    let mut groups: Vec<MemberGroup<'_>> = Vec::new();
    let mut index: HashMap<MemberId, usize> = HashMap::new();

    for entry in team_entries {
        match index.get(&entry.member_id) {
            Some(&i) => {
                let group = &mut groups[i];
                if entry.year > group.most_recent_year {
                    group.most_recent_year = entry.year;
                    group.team_name = &entry.team_name;
                }
            }
            None => {
                index.insert(entry.member_id, groups.len());
                groups.push(MemberGroup {
                    member_id: entry.member_id,
                    most_recent_year: entry.year,
                    team_name: &entry.team_name,
                });
            }
        }
    }

    groups
}

fn all_time_rows(
    team_entries: &[TeamSeasonEntry],
    games: &[GameResult],
    champions: &[ChampionEntry],
) -> Vec<TeamSummary> {
    let Some(latest_season) = team_entries.iter().map(|t| t.year).max() else {
        return Vec::new();
    };

    group_by_member(team_entries)
        .into_iter()
        .map(|group| {
            let stats = accumulate_game_stats(games, group.member_id, None);
            let titles = champions
                .iter()
                .filter(|c| c.member_id == group.member_id)
                .count() as u32;
            let status = if group.most_recent_year == latest_season {
                ActivityStatus::Active
            } else {
                ActivityStatus::Inactive
            };

            summary(group.member_id, group.team_name, stats, titles, false, status)
        })
        .collect()
}

fn season_rows(
    team_entries: &[TeamSeasonEntry],
    games: &[GameResult],
    champions: &[ChampionEntry],
    year: Season,
) -> Vec<TeamSummary> {
    team_entries
        .iter()
        .filter(|t| t.year == year)
        .map(|entry| {
            let stats = accumulate_game_stats(games, entry.member_id, Some(year));
            let is_champion = champions
                .iter()
                .any(|c| c.member_id == entry.member_id && c.year == year);
            let status = if is_champion {
                ActivityStatus::Champion
            } else {
                ActivityStatus::Active
            };

            summary(entry.member_id, &entry.team_name, stats, 0, is_champion, status)
        })
        .collect()
}

fn summary(
    member_id: MemberId,
    team_name: &str,
    stats: GameStats,
    championship_count: u32,
    is_champion_this_scope: bool,
    activity_status: ActivityStatus,
) -> TeamSummary {
    TeamSummary {
        rank: 0,
        team_name: team_name.to_string(),
        initials: team_initials(team_name),
        member_id,
        member_name: UNKNOWN_MEMBER.to_string(),
        wins: stats.wins,
        losses: stats.losses,
        ties: stats.ties,
        win_percentage: format_win_percentage(stats.wins, stats.losses),
        points_for: stats.points_for,
        points_against: stats.points_against,
        championship_count,
        is_champion_this_scope,
        activity_status,
    }
}
