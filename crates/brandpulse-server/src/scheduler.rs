//! Background refresh scheduler.
//!
//! Registers the periodic mention-refresh job at server startup. The
//! returned [`JobScheduler`] handle must be kept alive for the lifetime of
//! the process and shut down explicitly during graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use brandpulse_engine::BrandTracker;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Build and start the scheduler with the recurring refresh job.
///
/// Each firing runs one refresh cycle against the tracker: a no-op while no
/// brand is tracked, otherwise a reduced fan-out whose results are merged
/// into the store. Cycle failures are logged and swallowed; nobody waits on
/// them synchronously.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    tracker: Arc<BrandTracker>,
    refresh_interval: Duration,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(refresh_interval, move |_uuid, _lock| {
        let tracker = Arc::clone(&tracker);
        Box::pin(async move {
            match tracker.refresh().await {
                None => tracing::debug!("scheduler: no brand tracked, skipping refresh"),
                Some(added) => tracing::info!(added, "scheduler: refresh cycle complete"),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    Ok(scheduler)
}
