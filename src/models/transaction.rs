//! Roster transaction tallies.

use serde::{Deserialize, Serialize};

use super::{MemberId, RowId, Season};

/// Roster moves a member made, tallied per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: RowId,

    #[serde(rename = "leagueMemberId")]
    pub member_id: MemberId,

    pub year: Season,

    /// Week the moves were recorded in, when known.
    #[serde(default, deserialize_with = "super::wire::week_label")]
    pub week: Option<String>,

    #[serde(default)]
    pub trades: u32,

    #[serde(default)]
    pub acquisitions: u32,

    #[serde(default)]
    pub drops: u32,

    #[serde(default)]
    pub activations: u32,

    #[serde(default)]
    pub ir: u32,
}

impl Transaction {
    /// All moves on this row.
    pub fn total(&self) -> u64 {
        [
            self.trades,
            self.acquisitions,
            self.drops,
            self.activations,
            self.ir,
        ]
        .iter()
        .map(|&n| u64::from(n))
        .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_total() {
        let t = Transaction {
            trades: 1,
            acquisitions: 12,
            drops: 11,
            activations: 3,
            ir: 2,
            ..Default::default()
        };
        assert_eq!(t.total(), 29);
    }

    #[test]
    fn test_transaction_wire_format() {
        let t: Transaction = serde_json::from_str(
            r#"{"id": 5, "leagueMemberId": 3, "year": 2024, "trades": 2, "ir": 1}"#,
        )
        .unwrap();

        assert_eq!(t.member_id, 3);
        assert_eq!(t.trades, 2);
        assert_eq!(t.ir, 1);
        assert_eq!(t.drops, 0);
        assert!(t.week.is_none());
        assert_eq!(t.total(), 3);
    }
}
