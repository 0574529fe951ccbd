/// Football Updates: Scheduler
/// Každý cron tick spustí jeden update cycle, na předchozí cyklus se nečeká
/// (viz `MONITOR_SKIP_OVERLAP`)

use anyhow::{anyhow, Result};
use score_monitor::UpdateCycle;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::info;

pub fn cadence_job(cycle: Arc<UpdateCycle>, cron_expr: &str) -> Result<Job> {
    Job::new_async(cron_expr, move |_uuid, _l| {
        let cycle = cycle.clone();
        Box::pin(async move {
            info!("--- Update cycle ---");
            let outcome = cycle.run().await;
            info!("Update cycle finished: {}", outcome.label());
        })
    })
    .map_err(|e| anyhow!("Invalid cron expression `{}`: {:?}", cron_expr, e))
}

pub async fn start(cycle: Arc<UpdateCycle>, cron_expr: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new()
        .await
        .map_err(|e| anyhow!("Failed to create job scheduler: {:?}", e))?;

    info!("📅 Scheduling update cycle: {}", cron_expr);
    scheduler
        .add(cadence_job(cycle, cron_expr)?)
        .await
        .map_err(|e| anyhow!("Failed to add update cycle job: {:?}", e))?;
    scheduler
        .start()
        .await
        .map_err(|e| anyhow!("Failed to start job scheduler: {:?}", e))?;

    Ok(scheduler)
}
