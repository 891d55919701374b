//! Lenient field decoders for rows written by older clients.

use serde::{Deserialize, Deserializer, Serializer};

use super::Outcome;

/// Treat an explicit `null` the same as a missing string.
pub fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWeek {
    Text(String),
    Number(i64),
}

/// Week labels were stored as integers before playoff rounds were recorded,
/// so both `3` and `"3"` decode to the label `"3"`.
pub fn week_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawWeek>::deserialize(deserializer)?.map(|raw| match raw {
            RawWeek::Text(s) => s,
            RawWeek::Number(n) => n.to_string(),
        }),
    )
}

/// Single-letter outcome codes (`"W"`, `"L"`, `"T"`).
///
/// Unknown codes decode to `None` rather than failing the whole row.
pub mod outcome_code {
    use super::*;

    pub fn serialize<S>(value: &Option<Outcome>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(outcome) => serializer.serialize_str(outcome.code()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Outcome>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Outcome::from_code))
    }
}
