//! Cron-based scheduler for recurring collection ticks
//!
//! Uses `tokio-cron-scheduler`. Each registered task keeps per-run
//! statistics so the CLI can report collection health.

mod tasks;

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

pub use tasks::collection_task;

/// Scheduler errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Invalid cron expression
    #[error("Invalid cron expression: {0}")]
    InvalidCronExpression(String),

    /// Task not found
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Internal scheduler error
    #[error("Internal scheduler error: {0}")]
    Internal(String),
}

impl From<JobSchedulerError> for SchedulerError {
    fn from(err: JobSchedulerError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Statistics for a scheduled task
#[derive(Debug, Clone)]
pub struct TaskStats {
    /// Task name
    pub name: String,
    /// Cron expression
    pub cron_expression: String,
    /// Number of successful executions
    pub success_count: u64,
    /// Number of failed executions
    pub failure_count: u64,
    /// Last execution time
    pub last_run: Option<DateTime<Utc>>,
    /// Last error message
    pub last_error: Option<String>,
    /// Average execution duration in milliseconds
    pub avg_duration_ms: u64,
}

/// Internal task metadata
struct TaskMetadata {
    name: String,
    cron_expression: String,
    job_id: Uuid,
    success_count: AtomicU64,
    failure_count: AtomicU64,
    last_run: RwLock<Option<DateTime<Utc>>>,
    last_error: RwLock<Option<String>>,
    total_duration_ms: AtomicU64,
}

impl TaskMetadata {
    fn new(name: String, cron_expression: String, job_id: Uuid) -> Self {
        Self {
            name,
            cron_expression,
            job_id,
            success_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
            last_run: RwLock::new(None),
            last_error: RwLock::new(None),
            total_duration_ms: AtomicU64::new(0),
        }
    }

    fn to_stats(&self) -> TaskStats {
        let success = self.success_count.load(Ordering::Relaxed);
        let failure = self.failure_count.load(Ordering::Relaxed);
        let total = success + failure;
        let avg_duration = if total > 0 {
            self.total_duration_ms.load(Ordering::Relaxed) / total
        } else {
            0
        };

        TaskStats {
            name: self.name.clone(),
            cron_expression: self.cron_expression.clone(),
            success_count: success,
            failure_count: failure,
            last_run: *self.last_run.read(),
            last_error: self.last_error.read().clone(),
            avg_duration_ms: avg_duration,
        }
    }

    fn record_success(&self, duration_ms: u64) {
        self.success_count.fetch_add(1, Ordering::Relaxed);
        self.total_duration_ms
            .fetch_add(duration_ms, Ordering::Relaxed);
        *self.last_run.write() = Some(Utc::now());
    }

    fn record_failure(&self, error: String, duration_ms: u64) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        self.total_duration_ms
            .fetch_add(duration_ms, Ordering::Relaxed);
        *self.last_run.write() = Some(Utc::now());
        *self.last_error.write() = Some(error);
    }
}

/// Predefined cron expressions for common schedules
pub mod schedules {
    /// Every minute
    pub const EVERY_MINUTE: &str = "0 * * * * *";
    /// Every 15 minutes
    pub const EVERY_15_MINUTES: &str = "0 */15 * * * *";
    /// Every hour, at the top of the hour
    pub const HOURLY: &str = "0 0 * * * *";
    /// Every day at midnight
    pub const DAILY_MIDNIGHT: &str = "0 0 0 * * *";
}

/// Task scheduler for recurring background tasks
pub struct TaskScheduler {
    scheduler: AsyncMutex<JobScheduler>,
    tasks: Arc<RwLock<HashMap<String, Arc<TaskMetadata>>>>,
    running: Arc<AtomicBool>,
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("running", &self.running.load(Ordering::Relaxed))
            .field("task_count", &self.tasks.read().len())
            .finish_non_exhaustive()
    }
}

impl TaskScheduler {
    /// Create a new task scheduler (not started)
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying job scheduler cannot be
    /// initialized.
    #[instrument(skip_all)]
    pub async fn new() -> Result<Self, SchedulerError> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler: AsyncMutex::new(scheduler),
            tasks: Arc::new(RwLock::new(HashMap::new())),
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Start the scheduler
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying scheduler fails to start.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<(), SchedulerError> {
        if self.running.load(Ordering::Relaxed) {
            debug!("Scheduler already running");
            return Ok(());
        }

        self.scheduler.lock().await.start().await?;
        self.running.store(true, Ordering::Relaxed);
        info!("Task scheduler started");
        Ok(())
    }

    /// Stop the scheduler gracefully
    ///
    /// # Errors
    ///
    /// Returns an error when shutdown of the underlying scheduler fails.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<(), SchedulerError> {
        if !self.running.load(Ordering::Relaxed) {
            debug!("Scheduler already stopped");
            return Ok(());
        }

        self.scheduler.lock().await.shutdown().await?;
        self.running.store(false, Ordering::Relaxed);
        info!("Task scheduler stopped");
        Ok(())
    }

    /// Check if the scheduler is running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Add a scheduled task
    ///
    /// The cron expression uses 6 fields (sec min hour day month weekday).
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidCronExpression`] when the
    /// expression does not parse.
    #[instrument(skip(self, task))]
    pub async fn add_task<F, Fut>(
        &self,
        name: &str,
        cron_expression: &str,
        task: F,
    ) -> Result<(), SchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<(), String>> + Send + 'static,
    {
        cron_expression.parse::<cron::Schedule>().map_err(|e| {
            SchedulerError::InvalidCronExpression(format!("{cron_expression}: {e}"))
        })?;

        let name_clone = name.to_string();
        let tasks = Arc::clone(&self.tasks);

        let job = Job::new_async(cron_expression, move |_uuid, _lock| {
            let name = name_clone.clone();
            let tasks = Arc::clone(&tasks);
            let task_future = task();

            Box::pin(async move {
                debug!(task = %name, "Starting scheduled task");
                let start = std::time::Instant::now();
                let result = task_future.await;
                let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match result {
                    Ok(()) => {
                        if let Some(metadata) = tasks.read().get(&name) {
                            metadata.record_success(duration_ms);
                        }
                        info!(task = %name, duration_ms, "Task completed successfully");
                    },
                    Err(e) => {
                        if let Some(metadata) = tasks.read().get(&name) {
                            metadata.record_failure(e.clone(), duration_ms);
                        }
                        error!(task = %name, error = %e, duration_ms, "Task failed");
                    },
                }
            })
        })
        .map_err(|e| SchedulerError::InvalidCronExpression(e.to_string()))?;

        let job_id = job.guid();
        self.scheduler.lock().await.add(job).await?;

        let metadata = Arc::new(TaskMetadata::new(
            name.to_string(),
            cron_expression.to_string(),
            job_id,
        ));
        self.tasks.write().insert(name.to_string(), metadata);

        info!(task = %name, cron = %cron_expression, "Task scheduled");
        Ok(())
    }

    /// Remove a scheduled task
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::TaskNotFound`] when no task with that
    /// name is registered.
    #[instrument(skip(self))]
    pub async fn remove_task(&self, name: &str) -> Result<(), SchedulerError> {
        let metadata = self
            .tasks
            .write()
            .remove(name)
            .ok_or_else(|| SchedulerError::TaskNotFound(name.to_string()))?;

        self.scheduler.lock().await.remove(&metadata.job_id).await?;
        info!(task = %name, "Task removed");
        Ok(())
    }

    /// Get statistics for a specific task
    #[must_use]
    pub fn get_task_stats(&self, name: &str) -> Option<TaskStats> {
        self.tasks.read().get(name).map(|m| m.to_stats())
    }

    /// Get statistics for all tasks
    #[must_use]
    pub fn get_all_stats(&self) -> Vec<TaskStats> {
        self.tasks.read().values().map(|m| m.to_stats()).collect()
    }

    /// Get the number of scheduled tasks
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.read().len()
    }
}
