//! Derived standings models.
//!
//! Nothing here is persisted; standings are rebuilt from the raw tables on
//! every query.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{MemberId, Season};

/// Aggregation window for standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every recorded season pooled together.
    AllTime,
    /// A single season.
    Year(Season),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid scope '{0}': expected 'all' or a season year")]
pub struct ScopeParseError(pub String);

impl FromStr for Scope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "all" | "all-time" | "alltime" => Ok(Scope::AllTime),
            other => other
                .parse::<Season>()
                .map(Scope::Year)
                .map_err(|_| ScopeParseError(trimmed.to_string())),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::AllTime => write!(f, "all-time"),
            Scope::Year(year) => write!(f, "{}", year),
        }
    }
}

impl Serialize for Scope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether a team is still in the league, or won the season being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    Active,
    Inactive,
    Champion,
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityStatus::Active => write!(f, "Active"),
            ActivityStatus::Inactive => write!(f, "Inactive"),
            ActivityStatus::Champion => write!(f, "Champion"),
        }
    }
}

/// Game totals for one member over some window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub games_played: u32,
    pub points_for: i64,
    pub points_against: i64,
}

/// One ranked row of the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    /// 1-based position after sorting by team name.
    pub rank: u32,
    pub team_name: String,
    /// Up to two uppercase letters taken from the team name.
    pub initials: String,
    #[serde(rename = "leagueMemberId")]
    pub member_id: MemberId,
    /// Resolved display name; "Unknown" until (or unless) names are applied.
    #[serde(rename = "leagueMemberName")]
    pub member_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// `wins / (wins + losses)` as a percentage with one decimal, or "0%".
    pub win_percentage: String,
    pub points_for: i64,
    pub points_against: i64,
    /// Titles across all seasons. Always 0 for a single-year scope.
    pub championship_count: u32,
    #[serde(rename = "isChampion")]
    pub is_champion_this_scope: bool,
    #[serde(rename = "status")]
    pub activity_status: ActivityStatus,
}
