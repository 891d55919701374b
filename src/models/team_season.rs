//! Team-season entries: one member's team name for one season.

use serde::{Deserialize, Serialize};

use super::{MemberId, RowId, Season};

/// Binds a member to a team name for a single season.
///
/// A member has at most one entry per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeasonEntry {
    #[serde(default)]
    pub id: RowId,

    pub year: Season,

    #[serde(rename = "leagueMemberId")]
    pub member_id: MemberId,

    #[serde(default, deserialize_with = "super::wire::nullable_string")]
    pub team_name: String,
}

impl TeamSeasonEntry {
    pub fn new(year: Season, member_id: MemberId, team_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            year,
            member_id,
            team_name: team_name.into(),
        }
    }
}
