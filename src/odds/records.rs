use std::convert::TryFrom;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::odds::error::{OddsError, Result};

/// One game as handed over by a source. `None` means the key was absent;
/// `Some(Value::Null)` means the source sent an explicit null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawGameRecord {
    #[serde(default, deserialize_with = "present")]
    pub home_team: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub away_team: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub home_score: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub away_score: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub home_ml: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub away_ml: Option<Value>,
}

/// The eight-key output schema. Field order here is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedGameRecord {
    pub home_team: Value,
    pub away_team: Value,
    pub date: Value,
    pub status: Value,
    pub home_score: Value,
    pub away_score: Value,
    pub home_money_line: Value,
    pub away_money_line: Value,
}

/// Keeps a present-but-null key distinguishable from a missing one.
pub fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn take(field: Option<Value>, name: &'static str) -> std::result::Result<Value, &'static str> {
    field.ok_or(name)
}

impl TryFrom<RawGameRecord> for NormalizedGameRecord {
    /// Name of the first missing source field.
    type Error = &'static str;

    fn try_from(raw: RawGameRecord) -> std::result::Result<Self, Self::Error> {
        Ok(NormalizedGameRecord {
            home_team: take(raw.home_team, "home_team")?,
            away_team: take(raw.away_team, "away_team")?,
            date: take(raw.date, "date")?,
            status: take(raw.status, "status")?,
            home_score: take(raw.home_score, "home_score")?,
            away_score: take(raw.away_score, "away_score")?,
            home_money_line: take(raw.home_ml, "home_ml")?,
            away_money_line: take(raw.away_ml, "away_ml")?,
        })
    }
}

/// Maps every raw record onto the output schema, keeping input order.
/// Stops at the first record that cannot supply all eight fields.
pub fn normalize(raw_records: Vec<RawGameRecord>) -> Result<Vec<NormalizedGameRecord>> {
    raw_records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            NormalizedGameRecord::try_from(raw)
                .map_err(|field| OddsError::MissingField { index, field })
        })
        .collect()
}
