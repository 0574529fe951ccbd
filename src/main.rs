/// Football Updates: Live Score Monitor
///
/// Co dělá:
///   1. Podle cron kadence (default každou celou hodinu) stáhne live zápasy z football-data
///   2. Z prvního zápasu složí "Match: {home} vs {away}:" + skóre
///   3. Pošle to do Telex kanálu přes webhook, výsledek jen loguje
///
/// Co NEDĚLÁ: žádný retry, žádná deduplikace mezi cykly, nic neukládá
///
/// Spuštění:
///   TELEX_WEBHOOK_URL=https://ping.telex.im/v1/webhooks/... cargo run --bin football-updates

mod config;
mod scheduler;

use anyhow::{anyhow, Result};
use config::Config;
use dotenv::dotenv;
use football_feed::FootballDataClient;
use score_monitor::UpdateCycle;
use std::env;
use std::fs::File;
use std::sync::Arc;
use telex_notifier::TelexNotifier;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = Config::from_env()?;

    info!("=== Football Updates — LIVE SCORE MONITOR ===");
    info!("Provider: {}", config.football_api_url);
    info!("Cadence: {}", config.cron);
    info!("Dispatch mode: {:?}", config.dispatch_mode);
    info!("Logs: ./{}/", config.log_dir);

    // Single instance lock
    let lock_file_path = env::temp_dir().join("football_updates.lock");
    let lock_file = match File::create(&lock_file_path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Failed to create lock file at {:?}: {}", lock_file_path, e);
            return Ok(());
        }
    };

    let mut lock = fd_lock::RwLock::new(lock_file);
    let _write_guard = match lock.try_write() {
        Ok(guard) => {
            info!("Acquired single-instance lock.");
            guard
        }
        Err(_) => {
            warn!("Another instance of football-updates is already running! Exiting.");
            return Ok(());
        }
    };

    let source = FootballDataClient::new(&config.football_api_url, config.football_api_key.clone())?;
    let sink = TelexNotifier::new(&config.telex_webhook_url, &config.telex_username)?;
    let cycle = Arc::new(
        UpdateCycle::new(Arc::new(source), Arc::new(sink))
            .with_event_log(&config.log_dir)
            .with_mode(config.dispatch_mode)
            .skip_overlapping(config.skip_overlap),
    );

    let mut scheduler = scheduler::start(cycle.clone(), &config.cron).await?;

    if config.run_on_start {
        info!("🚀 Running initial update cycle...");
        let cycle = cycle.clone();
        tokio::spawn(async move {
            let outcome = cycle.run().await;
            info!("Initial update cycle finished: {}", outcome.label());
        });
    }

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received, shutting down scheduler.");
    scheduler
        .shutdown()
        .await
        .map_err(|e| anyhow!("Failed to shut down scheduler: {:?}", e))?;

    Ok(())
}
