/// Football Updates: Telex Notifier
/// Doručí zprávu do Telex kanálu přes webhook

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

pub const EVENT_NAME: &str = "Football Update";
pub const DEFAULT_USERNAME: &str = "Football Updates";

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one message with its score. No retry.
    async fn send(&self, message: &str, score: &str) -> Result<()>;
}

#[derive(Serialize, Debug, PartialEq)]
pub struct TelexPayload {
    pub event_name: String,
    pub message:    String,
    pub status:     String,   // "success" | "error"
    pub username:   String,
}

impl TelexPayload {
    pub fn football_update(message: &str, score: &str, username: &str) -> Self {
        Self {
            event_name: EVENT_NAME.to_string(),
            message:    format!("{message}\nScore: {score}"),
            status:     "success".to_string(),
            username:   username.to_string(),
        }
    }
}

pub struct TelexNotifier {
    client:      reqwest::Client,
    webhook_url: String,
    username:    String,
}

impl TelexNotifier {
    pub fn new(webhook_url: impl Into<String>, username: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("Failed to build Telex HTTP client")?;
        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
            username:    username.into(),
        })
    }
}

#[async_trait]
impl NotificationSink for TelexNotifier {
    async fn send(&self, message: &str, score: &str) -> Result<()> {
        let payload = TelexPayload::football_update(message, score, &self.username);
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .context("Telex webhook request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(200).collect();
            warn!("Telex webhook failed: {} — {}", status, excerpt);
            anyhow::bail!("Telex webhook failed: {} — {}", status, excerpt);
        }

        info!("Telex webhook accepted ({})", status);
        Ok(())
    }
}
