//! Identifier types shared by every table.

/// Row identifier assigned by the store (the `rowid` of a table).
pub type RowId = i64;

/// Stable identifier of a league member.
///
/// Distinct from the team name, which may change from season to season.
pub type MemberId = i32;

/// Season year (e.g. 2023).
pub type Season = i32;

/// Next free row id given the ids already in use.
///
/// Ids start at 1 and never reuse a gap below the current maximum.
pub fn next_row_id<I>(existing: I) -> RowId
where
    I: IntoIterator<Item = RowId>,
{
    existing.into_iter().max().unwrap_or(0).max(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_row_id_empty() {
        assert_eq!(next_row_id(Vec::new()), 1);
    }

    #[test]
    fn test_next_row_id_after_max() {
        assert_eq!(next_row_id(vec![3, 7, 2]), 8);
    }

    #[test]
    fn test_next_row_id_ignores_gaps() {
        assert_eq!(next_row_id(vec![1, 5]), 6);
    }

    #[test]
    fn test_next_row_id_negative_ids() {
        assert_eq!(next_row_id(vec![-4]), 1);
    }
}
