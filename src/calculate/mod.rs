//! Statistics calculation engine.
//!
//! Derives read-side views from the stored tables:
//! - Ranked standings, all-time or per season
//! - Per-member game logs in schedule order
//! - Transaction history
//! - Dashboard totals
//!
//! Everything here is a pure function of its inputs.

pub mod dashboard;
pub mod game_log;
pub mod standings;
pub mod transactions;
pub mod week;

pub use dashboard::{league_totals, LeagueTotals};
pub use game_log::{game_log, GameLogEntry};
pub use standings::{accumulate_game_stats, aggregate, apply_member_names, available_years};
pub use transactions::{transaction_log, TransactionFilter, TransactionLogEntry};
pub use week::{compare_weeks, WeekLabel};

/// Win rate as a display percentage with one decimal ("75.0%").
///
/// No decided games is "0%" rather than "0.0%". Exact half tenths round up
/// (9-7 is "56.3%").
pub fn format_win_percentage(wins: u32, losses: u32) -> String {
    let total = u64::from(wins) + u64::from(losses);
    if total == 0 {
        return "0%".to_string();
    }
    let tenths = (u64::from(wins) * 1000 + total / 2) / total;
    format!("{}.{}%", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_win_percentage() {
        assert_eq!(format_win_percentage(3, 1), "75.0%");
        assert_eq!(format_win_percentage(0, 0), "0%");
        assert_eq!(format_win_percentage(0, 4), "0.0%");
        assert_eq!(format_win_percentage(7, 0), "100.0%");
        assert_eq!(format_win_percentage(2, 1), "66.7%");
    }

    #[test]
    fn test_format_win_percentage_rounds_half_up() {
        assert_eq!(format_win_percentage(9, 7), "56.3%");
        assert_eq!(format_win_percentage(5, 11), "31.3%");
        assert_eq!(format_win_percentage(1, 15), "6.3%");
        assert_eq!(format_win_percentage(1, 7), "12.5%");
    }
}
