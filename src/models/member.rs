//! League member model.

use serde::{Deserialize, Serialize};

use super::MemberId;

/// A league participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueMember {
    #[serde(default)]
    pub id: MemberId,

    /// Display name; older rows may not have one.
    #[serde(rename = "leagueMember", default)]
    pub name: Option<String>,

    /// Seasons played in the league.
    #[serde(default)]
    pub experience: i32,
}

impl LeagueMember {
    pub fn new(id: MemberId, name: impl Into<String>, experience: i32) -> Self {
        Self {
            id,
            name: Some(name.into()),
            experience,
        }
    }
}
