//! Periodic task scheduling.

pub mod scheduler;

pub use scheduler::{JobCallback, PeriodicScheduler, SchedulerError, normalize_schedule};
