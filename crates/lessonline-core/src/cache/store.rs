//! DashMap-backed key/value store with per-entry expiry.
//!
//! Every operation locks only the shard holding its key, so a `set`, `get`,
//! `take` or `delete` on one key is linearizable with respect to the others
//! on that key, and operations on different keys do not contend beyond
//! sharing a shard.
//!
//! Reads treat an entry past its expiry as absent but leave it in place;
//! removing it is the [`Sweeper`](super::Sweeper)'s job.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use lessonline_types::ttl::Ttl;

use super::clock::{Clock, SystemClock};

/// A stored value and the instant after which it may be evicted.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    /// Expired means strictly before `now`; an entry is still live at the
    /// exact instant it expires.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Process-wide, in-memory store of expiring values.
///
/// Shared by handing out `Arc<ExpiringStore<V>>`; there is no global
/// instance.
pub struct ExpiringStore<V> {
    entries: DashMap<String, CacheEntry<V>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> ExpiringStore<V> {
    /// Create an empty store reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Return a copy of the live value under `key`.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone())
    }

    /// Insert or overwrite `key`, expiring `ttl` from now.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Ttl) {
        let expires_at = self.clock.now() + ttl.as_chrono();
        self.entries
            .insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Remove `key` if present.
    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Atomically remove and return the live value under `key`.
    ///
    /// Of several concurrent callers at most one receives the value.
    /// An expired entry is not returned and is left for the sweeper.
    pub fn take(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        self.entries
            .remove_if(key, |_, entry| !entry.is_expired(now))
            .map(|(_, entry)| entry.value)
    }

    /// Whether a live value is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Instant at which `key` becomes eligible for eviction.
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|entry| entry.expires_at)
    }

    /// Remove every entry whose expiry is strictly before now.
    ///
    /// Returns the number of entries evicted. Safe to run concurrently with
    /// the other operations: shards are locked one at a time.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut evicted = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                evicted += 1;
            }
            keep
        });
        evicted
    }

    /// Number of entries held, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for ExpiringStore<V> {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl<V> std::fmt::Debug for ExpiringStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringStore")
            .field("entries", &self.entries.len())
            .finish()
    }
}
