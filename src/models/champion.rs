//! Season champions.

use serde::{Deserialize, Serialize};

use super::{MemberId, RowId, Season};

/// The member who won a season.
///
/// One row per year is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionEntry {
    #[serde(default)]
    pub id: RowId,

    #[serde(rename = "leagueMemberId")]
    pub member_id: MemberId,

    pub year: Season,
}

impl ChampionEntry {
    pub fn new(member_id: MemberId, year: Season) -> Self {
        Self {
            id: 0,
            member_id,
            year,
        }
    }
}
