//! Cron scheduler for the periodic FareLens jobs.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{error, info};

use farelens_core::config::worker::WorkerConfig;
use farelens_core::error::AppError;

use crate::executor::JobRegistry;
use crate::jobs::{ALERT_SCAN, COUNTER_PURGE, DEDUP_SWEEP};

/// Cron-based scheduler driving the registered jobs.
pub struct CronScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Registry the cron entries dispatch into.
    registry: Arc<JobRegistry>,
    /// Worker configuration (cron expressions).
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(registry: Arc<JobRegistry>, config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            registry,
            config,
        })
    }

    /// Register all periodic tasks.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        let alert_scan_cron = self.config.alert_scan_cron.clone();
        let dedup_sweep_cron = self.config.dedup_sweep_cron.clone();
        let counter_purge_cron = self.config.counter_purge_cron.clone();
        self.register_job(ALERT_SCAN, &alert_scan_cron).await?;
        self.register_job(DEDUP_SWEEP, &dedup_sweep_cron).await?;
        self.register_job(COUNTER_PURGE, &counter_purge_cron).await?;

        info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        info!("Cron scheduler started");
        Ok(())
    }

    /// Shut down the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        info!("Cron scheduler shut down");
        Ok(())
    }

    async fn register_job(&self, name: &'static str, cron: &str) -> Result<(), AppError> {
        let registry = Arc::clone(&self.registry);
        let job = CronJob::new_async(cron, move |_uuid, _lock| {
            let registry = Arc::clone(&registry);
            Box::pin(async move {
                if let Err(e) = registry.run(name).await {
                    error!(job = name, error = %e, "Scheduled job failed");
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create {name} schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add {name} schedule: {e}")))?;

        info!(job = name, %cron, "Registered scheduled job");
        Ok(())
    }
}
