/// Football Updates: Football Feed
///
/// Live match summary z externího provideru (football-data.org v4):
///   - `MatchDataSource` trait: co update cycle potřebuje od zdroje dat
///   - `FootballDataClient`: HTTP implementace nad reqwest
///   - `extract`: defenzivní čtení jmen týmů a skóre z volně typovaných záznamů

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod client;
pub mod extract;

pub use client::FootballDataClient;
pub use extract::{extract_match, extract_score, extract_team_name, ExtractedMatch, FieldValue};

/// One match exactly as the provider sent it. No shape is guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMatchRecord(pub Value);

impl RawMatchRecord {
    /// Top-level lookup. Non-object records have no keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|m| m.get(key))
    }

    pub fn is_mapping(&self) -> bool {
        self.0.is_object()
    }
}

impl From<Value> for RawMatchRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

pub type MatchBatch = Vec<RawMatchRecord>;

#[async_trait]
pub trait MatchDataSource: Send + Sync {
    /// Current live-match summary. `Ok(None)` = provider returned no batch at all.
    async fn fetch_summary(&self) -> Result<Option<MatchBatch>>;
}
