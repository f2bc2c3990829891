//! Cron scheduler for periodic background tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use gfiles_core::config::worker::WorkerConfig;
use gfiles_core::error::AppError;

use crate::executor::JobExecutor;
use crate::jobs::report::COMPLIANCE_REPORT;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Executor the scheduled tasks dispatch through
    executor: Arc<JobExecutor>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(executor: Arc<JobExecutor>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler, executor })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(&self, config: &WorkerConfig) -> Result<(), AppError> {
        self.register_compliance_report(&config.report_schedule)
            .await?;
        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))
    }

    async fn register_compliance_report(&self, schedule: &str) -> Result<(), AppError> {
        let executor = Arc::clone(&self.executor);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let executor = Arc::clone(&executor);
            Box::pin(async move {
                match executor.execute(COMPLIANCE_REPORT).await {
                    Ok(_) => tracing::info!("Scheduled compliance report completed"),
                    Err(e) => tracing::error!("Scheduled compliance report failed: {}", e),
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Invalid report schedule '{schedule}': {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to schedule report job: {e}")))?;

        Ok(())
    }
}
