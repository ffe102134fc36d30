//! Periodic eviction of expired cache entries.
//!
//! The sweeper bounds memory held by halves whose counterpart never arrived.
//! Pairing correctness does not depend on it running on time. Each sweep
//! runs in its own task; a panic inside one sweep is logged and the next
//! scheduled sweep runs as usual.

use std::sync::Arc;

use super::store::ExpiringStore;
use crate::schedule::scheduler::{JobCallback, PeriodicScheduler, SchedulerError};

/// Anything that can evict its own expired entries.
pub trait Sweep: Send + Sync + 'static {
    /// Evict expired entries, returning how many were removed.
    fn sweep_expired(&self) -> usize;
}

impl<V: Clone + Send + Sync + 'static> Sweep for ExpiringStore<V> {
    fn sweep_expired(&self) -> usize {
        ExpiringStore::sweep_expired(self)
    }
}

/// Runs [`Sweep::sweep_expired`] on a schedule.
pub struct Sweeper<S> {
    target: Arc<S>,
}

impl<S: Sweep> Sweeper<S> {
    /// Scheduler job name under which the sweeper registers.
    pub const JOB_NAME: &'static str = "cache-sweeper";

    pub fn new(target: Arc<S>) -> Self {
        Self { target }
    }

    /// Perform one sweep, isolated in its own blocking task.
    ///
    /// Returns the number of evicted entries, or `None` if the sweep
    /// panicked. Never panics itself.
    pub async fn run_once(&self) -> Option<usize> {
        let target = Arc::clone(&self.target);
        match tokio::task::spawn_blocking(move || target.sweep_expired()).await {
            Ok(evicted) => {
                if evicted > 0 {
                    tracing::info!(evicted, "swept expired cache entries");
                } else {
                    tracing::trace!("cache sweep found nothing to evict");
                }
                Some(evicted)
            }
            Err(e) => {
                tracing::error!(error = %e, "cache sweep failed");
                None
            }
        }
    }

    /// Register this sweeper with `scheduler` under [`Self::JOB_NAME`].
    pub async fn register(
        self: Arc<Self>,
        scheduler: &PeriodicScheduler,
        schedule: &str,
    ) -> Result<(), SchedulerError> {
        let callback: JobCallback = Arc::new(move |_fired_at| {
            let sweeper = Arc::clone(&self);
            Box::pin(async move {
                sweeper.run_once().await;
            })
        });
        scheduler
            .schedule_job(Self::JOB_NAME, schedule, callback)
            .await
    }
}
