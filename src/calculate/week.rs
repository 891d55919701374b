//! Chronological ordering of week labels.
//!
//! Regular-season weeks are plain integers ("1".."17"); playoff rounds are
//! labelled "Rd1", "rd 2" and so on. Anything else is a freeform label.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static REGULAR_WEEK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("regular week pattern"));

static PLAYOFF_ROUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rd\s*(\d+)").expect("playoff round pattern"));

/// A week label classified for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekLabel<'a> {
    /// Regular-season week; holds the digit string.
    Regular(&'a str),
    /// Playoff round; unparseable round numbers count as round 0.
    Playoff(u64),
    Other(&'a str),
}

impl<'a> WeekLabel<'a> {
    pub fn classify(label: &'a str) -> Self {
        if REGULAR_WEEK.is_match(label) {
            return WeekLabel::Regular(label);
        }

        if label
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("rd"))
        {
            let round = PLAYOFF_ROUND
                .captures(label)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .unwrap_or(0);
            return WeekLabel::Playoff(round);
        }

        WeekLabel::Other(label)
    }
}

/// Compare two digit strings by numeric value without overflowing.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Order two week labels chronologically.
///
/// Missing labels sort last. Two regular weeks compare numerically, every
/// regular week precedes every playoff round, rounds compare by number, and
/// anything else falls back to ordinal string order.
pub fn compare_weeks(a: Option<&str>, b: Option<&str>) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => (a, b),
    };

    match (WeekLabel::classify(a), WeekLabel::classify(b)) {
        (WeekLabel::Regular(x), WeekLabel::Regular(y)) => cmp_digits(x, y),
        (WeekLabel::Playoff(x), WeekLabel::Playoff(y)) => x.cmp(&y),
        (WeekLabel::Playoff(_), _) => Ordering::Greater,
        (_, WeekLabel::Playoff(_)) => Ordering::Less,
        _ => a.cmp(b),
    }
}
