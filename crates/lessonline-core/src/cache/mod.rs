//! Ephemeral, process-local cache with per-entry expiry.
//!
//! - [`ExpiringStore`] maps string keys to values with an absolute expiry.
//! - [`Sweeper`] evicts expired entries on a schedule.
//! - [`Clock`] abstracts "now" so tests can move time by hand.

pub mod clock;
pub mod store;
pub mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CacheEntry, ExpiringStore};
pub use sweeper::{Sweep, Sweeper};
