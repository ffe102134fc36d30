//! Periodic task facility wrapping `tokio-cron-scheduler`.
//!
//! Jobs are registered by name against a cron expression or a human-readable
//! schedule ("every minute", "daily at 04:00"). The cache sweeper and any
//! daily maintenance job share one scheduler but are otherwise independent.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

/// Errors that can occur during scheduling operations.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// Failed to create or manipulate a cron job.
    #[error("scheduler error: {0}")]
    JobError(String),

    /// Invalid cron expression or schedule string.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// No job registered under this name.
    #[error("job '{0}' not registered in scheduler")]
    JobNotFound(String),
}

// ---------------------------------------------------------------------------
// Schedule normalization
// ---------------------------------------------------------------------------

/// Normalize a schedule string to a 6-field cron expression (with seconds).
///
/// Accepted forms (case-insensitive):
/// - 5-field cron                  -> seconds field `0` prepended
/// - 6-field cron                  -> unchanged
/// - "every minute" / "minutely"   -> "0 * * * * *"
/// - "every hour" / "hourly"       -> "0 0 * * * *"
/// - "every day" / "daily"         -> "0 0 0 * * *"
/// - "every day at HH:MM" / "daily at HH:MM" -> "0 MM HH * * *"
/// - "every N seconds|minutes|hours"
pub fn normalize_schedule(input: &str) -> Result<String, SchedulerError> {
    let trimmed = input.trim();
    let invalid = || SchedulerError::InvalidSchedule(input.to_string());

    match trimmed.split_whitespace().count() {
        5 if looks_like_cron(trimmed) => return Ok(format!("0 {trimmed}")),
        6 if looks_like_cron(trimmed) => return Ok(trimmed.to_string()),
        _ => {}
    }

    let lower = trimmed.to_lowercase();
    match lower.as_str() {
        "every minute" | "minutely" => return Ok("0 * * * * *".to_string()),
        "every hour" | "hourly" => return Ok("0 0 * * * *".to_string()),
        "every day" | "daily" => return Ok("0 0 0 * * *".to_string()),
        _ => {}
    }

    let at_time = lower
        .strip_prefix("every day at ")
        .or_else(|| lower.strip_prefix("daily at "));
    if let Some(at_time) = at_time {
        let (hour, minute) = parse_clock_time(at_time).ok_or_else(invalid)?;
        return Ok(format!("0 {minute} {hour} * * *"));
    }

    if let Some(rest) = lower.strip_prefix("every ") {
        let words: Vec<&str> = rest.split_whitespace().collect();
        if let [count, unit] = words.as_slice() {
            let n: u32 = count.parse().map_err(|_| invalid())?;
            if n == 0 {
                return Err(SchedulerError::InvalidSchedule(
                    "interval must be > 0".to_string(),
                ));
            }
            return match unit.trim_end_matches('s') {
                "second" => Ok(format!("*/{n} * * * * *")),
                "minute" => Ok(format!("0 */{n} * * * *")),
                "hour" => Ok(format!("0 0 */{n} * * *")),
                _ => Err(invalid()),
            };
        }
    }

    Err(SchedulerError::InvalidSchedule(format!(
        "unrecognized schedule format: '{trimmed}'"
    )))
}

/// Cron fields only contain digits, `*`, `/`, `,`, `-` or names like `MON`.
fn looks_like_cron(s: &str) -> bool {
    !s.to_lowercase().starts_with("every")
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || " */,-?".contains(c))
}

fn parse_clock_time(s: &str) -> Option<(u32, u32)> {
    let (hour, minute) = s.trim().split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}

// ---------------------------------------------------------------------------
// PeriodicScheduler
// ---------------------------------------------------------------------------

/// Callback invoked each time a job fires, with the firing instant.
pub type JobCallback =
    Arc<dyn Fn(DateTime<Utc>) -> futures_util::future::BoxFuture<'static, ()> + Send + Sync>;

/// A registered job.
struct ScheduledJob {
    /// The job UUID assigned by tokio-cron-scheduler.
    job_id: Uuid,
    /// The normalized cron expression.
    cron_expr: String,
}

/// Named periodic jobs on top of `tokio_cron_scheduler::JobScheduler`.
pub struct PeriodicScheduler {
    inner: Arc<RwLock<Option<JobScheduler>>>,
    jobs: Arc<RwLock<HashMap<String, ScheduledJob>>>,
}

impl PeriodicScheduler {
    /// Create a scheduler (not yet started).
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            jobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start the scheduler. Must be called before scheduling jobs.
    pub async fn start(&self) -> Result<(), SchedulerError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| SchedulerError::JobError(e.to_string()))?;

        scheduler
            .start()
            .await
            .map_err(|e| SchedulerError::JobError(e.to_string()))?;

        *self.inner.write().await = Some(scheduler);

        tracing::info!("periodic scheduler started");
        Ok(())
    }

    /// Stop the scheduler and forget all jobs.
    pub async fn stop(&self) -> Result<(), SchedulerError> {
        if let Some(mut scheduler) = self.inner.write().await.take() {
            scheduler
                .shutdown()
                .await
                .map_err(|e| SchedulerError::JobError(e.to_string()))?;
            tracing::info!("periodic scheduler stopped");
        }
        self.jobs.write().await.clear();
        Ok(())
    }

    /// Register `callback` to run on `schedule` under `name`.
    ///
    /// A job already registered under `name` is replaced.
    pub async fn schedule_job(
        &self,
        name: &str,
        schedule: &str,
        callback: JobCallback,
    ) -> Result<(), SchedulerError> {
        let cron_expr = normalize_schedule(schedule)?;

        let inner = self.inner.read().await;
        let scheduler = inner
            .as_ref()
            .ok_or_else(|| SchedulerError::JobError("scheduler not started".to_string()))?;

        let job_name = name.to_string();
        let job = Job::new_async(cron_expr.as_str(), move |_uuid, _lock| {
            let cb = callback.clone();
            let job_name = job_name.clone();
            Box::pin(async move {
                let now = Utc::now();
                tracing::debug!(job = %job_name, %now, "scheduled job fired");
                cb(now).await;
            })
        })
        .map_err(|e| SchedulerError::InvalidSchedule(e.to_string()))?;

        let job_id = job.guid();
        scheduler
            .add(job)
            .await
            .map_err(|e| SchedulerError::JobError(e.to_string()))?;

        let previous = self.jobs.write().await.insert(
            name.to_string(),
            ScheduledJob {
                job_id,
                cron_expr: cron_expr.clone(),
            },
        );
        if let Some(previous) = previous {
            scheduler
                .remove(&previous.job_id)
                .await
                .map_err(|e| SchedulerError::JobError(e.to_string()))?;
            tracing::debug!(job = %name, "replaced existing job");
        }

        tracing::info!(job = %name, %job_id, cron = %cron_expr, "job scheduled");
        Ok(())
    }

    /// Remove the job registered under `name`.
    pub async fn unschedule_job(&self, name: &str) -> Result<(), SchedulerError> {
        let entry = self
            .jobs
            .write()
            .await
            .remove(name)
            .ok_or_else(|| SchedulerError::JobNotFound(name.to_string()))?;

        if let Some(scheduler) = self.inner.read().await.as_ref() {
            scheduler
                .remove(&entry.job_id)
                .await
                .map_err(|e| SchedulerError::JobError(e.to_string()))?;
        }

        tracing::info!(job = %name, "job unscheduled");
        Ok(())
    }

    pub async fn has_job(&self, name: &str) -> bool {
        self.jobs.read().await.contains_key(name)
    }

    /// Normalized cron expression of the job registered under `name`.
    pub async fn cron_expr(&self, name: &str) -> Option<String> {
        self.jobs
            .read()
            .await
            .get(name)
            .map(|job| job.cron_expr.clone())
    }

    pub async fn job_count(&self) -> usize {
        self.jobs.read().await.len()
    }
}

impl Default for PeriodicScheduler {
    fn default() -> Self {
        Self::new()
    }
}
