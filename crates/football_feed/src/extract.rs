/// Football Updates: Field Extraction
///
/// Záznamy od provideru jsou volně typované:
///   - `homeTeam` / `awayTeam`: plain jméno, nebo `{ "name": .. }`
///   - `score`: plain text, nebo `{ "fulltime": .. }`
/// Cokoliv jiného spadne na default, nikdy na error.

use serde_json::{Map, Value};
use tracing::error;

use crate::RawMatchRecord;

pub const UNKNOWN_TEAM: &str = "Unknown Team";
pub const NO_SCORE: &str = "N/A";

const TEAM_NAME_FIELD: &str = "name";
const SCORE_KEY: &str = "score";
const SCORE_FULLTIME_FIELD: &str = "fulltime";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMatch {
    pub home_team: String,
    pub away_team: String,
    pub score:     String,
}

/// The two shapes a team reference or score value can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Nested(&'a Map<String, Value>),
}

impl<'a> FieldValue<'a> {
    /// `None` for absent, null and every other JSON shape.
    pub fn from_json(value: Option<&'a Value>) -> Option<Self> {
        match value? {
            Value::String(s) => Some(FieldValue::Text(s)),
            Value::Object(m) => Some(FieldValue::Nested(m)),
            _ => None,
        }
    }
}

/// Reason a lookup fell back to its default. Only `Fault` is worth an error log.
#[derive(Debug)]
enum Miss {
    Absent,
    Fault(String),
}

fn read_text<'a>(
    record: &'a RawMatchRecord,
    key: &str,
    nested_field: &str,
) -> Result<&'a str, Miss> {
    if !record.is_mapping() {
        return Err(Miss::Fault(format!("match record is not an object: {}", record.0)));
    }

    match FieldValue::from_json(record.get(key)) {
        Some(FieldValue::Text(text)) => Ok(text),
        Some(FieldValue::Nested(inner)) => match inner.get(nested_field) {
            Some(Value::String(text)) => Ok(text.as_str()),
            None | Some(Value::Null) => Err(Miss::Absent),
            Some(other) => Err(Miss::Fault(format!("`{key}.{nested_field}` is not text: {other}"))),
        },
        None => Err(Miss::Absent),
    }
}

pub fn extract_team_name(record: &RawMatchRecord, key: &str) -> String {
    match read_text(record, key, TEAM_NAME_FIELD) {
        Ok(name) => name.to_string(),
        Err(Miss::Absent) => UNKNOWN_TEAM.to_string(),
        Err(Miss::Fault(reason)) => {
            error!("Error extracting team name for key {}: {}", key, reason);
            UNKNOWN_TEAM.to_string()
        }
    }
}

pub fn extract_score(record: &RawMatchRecord) -> String {
    match read_text(record, SCORE_KEY, SCORE_FULLTIME_FIELD) {
        Ok(score) => score.to_string(),
        Err(Miss::Absent) => NO_SCORE.to_string(),
        Err(Miss::Fault(reason)) => {
            error!("Error extracting score: {}", reason);
            NO_SCORE.to_string()
        }
    }
}

pub fn extract_match(record: &RawMatchRecord) -> ExtractedMatch {
    ExtractedMatch {
        home_team: extract_team_name(record, "homeTeam"),
        away_team: extract_team_name(record, "awayTeam"),
        score:     extract_score(record),
    }
}
