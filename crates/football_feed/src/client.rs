/// Football Updates: football-data.org Client
/// Live match summary, GET /matches?status=LIVE

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{MatchBatch, MatchDataSource, RawMatchRecord};

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";

pub struct FootballDataClient {
    client:   reqwest::Client,
    base_url: String,
    api_key:  Option<String>,   // None = no auth header (free tier / mock provider)
}

impl FootballDataClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("football-updates/0.1")
            .timeout(Duration::from_secs(15))
            .build()
            .context("Failed to build football-data HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    pub fn summary_url(&self) -> String {
        format!("{}/matches?status=LIVE", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl MatchDataSource for FootballDataClient {
    async fn fetch_summary(&self) -> Result<Option<MatchBatch>> {
        let url = self.summary_url();
        let mut req = self.client.get(&url);
        if let Some(key) = &self.api_key {
            req = req.header("X-Auth-Token", key);
        }

        let resp = req.send().await.context("football-data request failed")?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(200).collect();
            warn!("football-data API failed {status}: {excerpt}");
            anyhow::bail!("football-data HTTP {}: {}", status, excerpt);
        }

        let raw = resp.text().await.context("football-data body read failed")?;
        let batch = parse_summary(&raw)?;
        debug!(
            "football-data summary: {} matches",
            batch.as_ref().map(|b| b.len()).unwrap_or(0)
        );
        Ok(batch)
    }
}

/// `{"matches": [...]}` → batch. Missing or null `matches` means no batch.
pub fn parse_summary(raw: &str) -> Result<Option<MatchBatch>> {
    let parsed: Value = serde_json::from_str(raw)
        .with_context(|| format!("Failed to parse summary: {}", raw.chars().take(200).collect::<String>()))?;

    match parsed.get("matches") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(
            items.iter().cloned().map(RawMatchRecord::from).collect(),
        )),
        Some(other) => anyhow::bail!("`matches` is not an array: {}", other),
    }
}
