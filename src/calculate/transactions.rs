//! Transaction history view.

use serde::Serialize;

use crate::models::{MemberId, Season, Transaction};
use crate::names::MemberNames;

use super::week::compare_weeks;

/// Optional member/season filter; `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub member_id: Option<MemberId>,
    pub year: Option<Season>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        self.member_id.map_or(true, |m| t.member_id == m) && self.year.map_or(true, |y| t.year == y)
    }

    /// Number of active filters.
    pub fn active_count(&self) -> usize {
        usize::from(self.member_id.is_some()) + usize::from(self.year.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLogEntry {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(rename = "leagueMemberName")]
    pub member_name: String,
    pub total: u64,
}

/// Filter transactions and order them newest season first, then by week.
pub fn transaction_log(
    transactions: &[Transaction],
    filter: TransactionFilter,
    names: &MemberNames,
) -> Vec<TransactionLogEntry> {
    let mut rows: Vec<&Transaction> = transactions.iter().filter(|t| filter.matches(t)).collect();
    rows.sort_by(|a, b| {
        b.year
            .cmp(&a.year)
            .then_with(|| compare_weeks(a.week.as_deref(), b.week.as_deref()))
    });

    rows.into_iter()
        .map(|t| TransactionLogEntry {
            transaction: t.clone(),
            member_name: names.resolve(t.member_id).to_string(),
            total: t.total(),
        })
        .collect()
}
