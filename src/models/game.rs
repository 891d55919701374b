//! Per-game results.

use serde::{Deserialize, Serialize};

use super::{MemberId, RowId, Season};

/// Result of one game from one participant's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// Parse a stored result code, case-insensitively.
    ///
    /// Accepts the single-letter codes and the full words.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "W" | "WIN" => Some(Outcome::Win),
            "L" | "LOSS" => Some(Outcome::Loss),
            "T" | "TIE" => Some(Outcome::Tie),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Tie => "T",
        }
    }

    /// The same game seen from the opponent's side.
    pub fn mirrored(&self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One row of game data.
///
/// Every game is stored twice, once per participant, with member/opponent,
/// points and outcome swapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    #[serde(default)]
    pub id: RowId,

    #[serde(rename = "leagueMemberId")]
    pub member_id: MemberId,

    pub opponent_id: MemberId,

    #[serde(default)]
    pub points_for: i64,

    #[serde(default)]
    pub points_against: i64,

    #[serde(rename = "winLossTie", default, with = "super::wire::outcome_code")]
    pub outcome: Option<Outcome>,

    pub year: Season,

    /// Regular-season week number or playoff round label ("Rd1").
    #[serde(default, deserialize_with = "super::wire::week_label")]
    pub week: Option<String>,
}

impl GameResult {
    pub fn new(
        member_id: MemberId,
        opponent_id: MemberId,
        points_for: i64,
        points_against: i64,
        outcome: Outcome,
        year: Season,
        week: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            member_id,
            opponent_id,
            points_for,
            points_against,
            outcome: Some(outcome),
            year,
            week: Some(week.into()),
        }
    }

    /// The opponent's row for the same game.
    pub fn mirrored(&self) -> Self {
        Self {
            id: 0,
            member_id: self.opponent_id,
            opponent_id: self.member_id,
            points_for: self.points_against,
            points_against: self.points_for,
            outcome: self.outcome.map(|o| o.mirrored()),
            year: self.year,
            week: self.week.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_code() {
        assert_eq!(Outcome::from_code("W"), Some(Outcome::Win));
        assert_eq!(Outcome::from_code("l"), Some(Outcome::Loss));
        assert_eq!(Outcome::from_code(" t "), Some(Outcome::Tie));
        assert_eq!(Outcome::from_code("Win"), Some(Outcome::Win));
        assert_eq!(Outcome::from_code("X"), None);
        assert_eq!(Outcome::from_code(""), None);
    }

    #[test]
    fn test_game_wire_format() {
        let game: GameResult = serde_json::from_str(
            r#"{"id": 12, "leagueMemberId": 1, "opponentId": 2, "pointsFor": 110,
                "pointsAgainst": 95, "winLossTie": "w", "year": 2022, "week": "Rd2"}"#,
        )
        .unwrap();

        assert_eq!(game.outcome, Some(Outcome::Win));
        assert_eq!(game.week.as_deref(), Some("Rd2"));

        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["winLossTie"], "W");
        assert_eq!(json["leagueMemberId"], 1);
    }

    #[test]
    fn test_game_numeric_week() {
        let game: GameResult = serde_json::from_str(
            r#"{"leagueMemberId": 1, "opponentId": 2, "winLossTie": "L", "year": 2020, "week": 7}"#,
        )
        .unwrap();
        assert_eq!(game.week.as_deref(), Some("7"));
    }

    #[test]
    fn test_game_unknown_outcome_is_none() {
        let game: GameResult = serde_json::from_str(
            r#"{"leagueMemberId": 1, "opponentId": 2, "winLossTie": "?", "year": 2020}"#,
        )
        .unwrap();
        assert!(game.outcome.is_none());
        assert!(game.week.is_none());
    }

    #[test]
    fn test_mirrored_game() {
        let game = GameResult::new(1, 2, 120, 80, Outcome::Win, 2023, "4");
        let other = game.mirrored();

        assert_eq!(other.member_id, 2);
        assert_eq!(other.opponent_id, 1);
        assert_eq!(other.points_for, 80);
        assert_eq!(other.points_against, 120);
        assert_eq!(other.outcome, Some(Outcome::Loss));
        assert_eq!(other.week.as_deref(), Some("4"));
    }
}
