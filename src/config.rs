/// Football Updates: Config
/// Vše z env proměnných (`.env` načte `main` přes dotenv)

use anyhow::{Context, Result};
use football_feed::client::DEFAULT_BASE_URL;
use score_monitor::DispatchMode;
use telex_notifier::DEFAULT_USERNAME;
use tracing::warn;

/// Top of every hour (sec min hour dom mon dow).
pub const DEFAULT_CRON: &str = "0 0 * * * *";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub football_api_url:  String,
    pub football_api_key:  Option<String>,
    pub telex_webhook_url: String,
    pub telex_username:    String,
    pub cron:              String,
    pub log_dir:           String,
    pub dispatch_mode:     DispatchMode,
    pub skip_overlap:      bool,
    pub run_on_start:      bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // blank values count as unset
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let telex_webhook_url = get("TELEX_WEBHOOK_URL")
            .context("TELEX_WEBHOOK_URL must be set")?;

        let dispatch_mode = match get("MONITOR_DISPATCH_MODE") {
            None => DispatchMode::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{e}; falling back to first-match dispatch");
                DispatchMode::default()
            }),
        };

        Ok(Self {
            football_api_url:  get("FOOTBALL_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            football_api_key:  get("FOOTBALL_API_KEY"),
            telex_webhook_url,
            telex_username:    get("TELEX_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            cron:              get("MONITOR_CRON").unwrap_or_else(|| DEFAULT_CRON.to_string()),
            log_dir:           get("MONITOR_LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
            dispatch_mode,
            skip_overlap:      flag("MONITOR_SKIP_OVERLAP", get("MONITOR_SKIP_OVERLAP")),
            run_on_start:      flag("MONITOR_RUN_ON_START", get("MONITOR_RUN_ON_START")),
        })
    }
}

/// Unset → false. Unknown values → false with a warning.
fn flag(key: &str, raw: Option<String>) -> bool {
    let Some(raw) = raw else { return false };
    parse_flag(&raw).unwrap_or_else(|| {
        warn!("{key}={raw} is not a boolean; treating it as false");
        false
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on"  => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
