//! Named time-to-live durations for cached entries.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// The fixed set of lifetimes a cache entry may be given.
///
/// Variants are declared shortest first, so the derived ordering matches
/// the ordering of the durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ttl {
    OneMinute,
    FiveMinutes,
    TenMinutes,
    ThirtyMinutes,
    OneHour,
    OneDay,
    OneWeek,
    OneMonth,
    OneYear,
}

impl Ttl {
    pub const ALL: [Ttl; 9] = [
        Ttl::OneMinute,
        Ttl::FiveMinutes,
        Ttl::TenMinutes,
        Ttl::ThirtyMinutes,
        Ttl::OneHour,
        Ttl::OneDay,
        Ttl::OneWeek,
        Ttl::OneMonth,
        Ttl::OneYear,
    ];

    pub fn as_secs(self) -> u64 {
        match self {
            Ttl::OneMinute => MINUTE,
            Ttl::FiveMinutes => 5 * MINUTE,
            Ttl::TenMinutes => 10 * MINUTE,
            Ttl::ThirtyMinutes => 30 * MINUTE,
            Ttl::OneHour => HOUR,
            Ttl::OneDay => DAY,
            Ttl::OneWeek => 7 * DAY,
            // Calendar-agnostic: a month is 30 days, a year 365.
            Ttl::OneMonth => 30 * DAY,
            Ttl::OneYear => 365 * DAY,
        }
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.as_secs())
    }

    pub fn as_chrono(self) -> chrono::Duration {
        chrono::Duration::seconds(self.as_secs() as i64)
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Ttl::OneHour
    }
}

impl std::fmt::Display for Ttl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Ttl::OneMinute => "1m",
            Ttl::FiveMinutes => "5m",
            Ttl::TenMinutes => "10m",
            Ttl::ThirtyMinutes => "30m",
            Ttl::OneHour => "1h",
            Ttl::OneDay => "1d",
            Ttl::OneWeek => "7d",
            Ttl::OneMonth => "30d",
            Ttl::OneYear => "365d",
        };
        f.write_str(label)
    }
}
