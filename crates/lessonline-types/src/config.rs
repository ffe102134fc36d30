//! Configuration types for lessonline.
//!
//! `AppConfig` represents the top-level `lessonline.toml`. Every field has a
//! default so an empty file (or no file at all) yields a runnable config.

use secrecy::SecretString;
use serde::Deserialize;

use crate::ttl::Ttl;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub line: LineConfig,
    #[serde(default)]
    pub records: RecordsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Externally reachable base URL, used to build delete links in replies.
    #[serde(default)]
    pub public_url: Option<String>,
    /// Offset from UTC, in minutes, used when showing lesson dates.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_utc_offset_minutes() -> i32 {
    // Asia/Bangkok
    7 * 60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: None,
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl ServerConfig {
    /// Base URL for links sent back to users.
    ///
    /// Falls back to `http://{host}:{port}` when no public URL is set.
    pub fn link_base(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }
}

/// LINE Messaging API channel settings.
#[derive(Debug, Deserialize)]
pub struct LineConfig {
    /// Channel access token (long-lived).
    #[serde(default)]
    pub access_token: Option<SecretString>,
    /// Channel secret; when set, webhook signatures are verified.
    #[serde(default)]
    pub channel_secret: Option<SecretString>,
    #[serde(default = "default_line_api_base")]
    pub api_base: String,
    #[serde(default = "default_line_data_api_base")]
    pub data_api_base: String,
}

fn default_line_api_base() -> String {
    "https://api.line.me".to_string()
}

fn default_line_data_api_base() -> String {
    "https://api-data.line.me".to_string()
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            channel_secret: None,
            api_base: default_line_api_base(),
            data_api_base: default_line_data_api_base(),
        }
    }
}

/// Lesson-record service endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsConfig {
    #[serde(default = "default_records_base_url")]
    pub base_url: String,
}

fn default_records_base_url() -> String {
    "http://127.0.0.1:8100".to_string()
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            base_url: default_records_base_url(),
        }
    }
}

/// Fragment cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// How long a half waits for its counterpart.
    #[serde(default)]
    pub half_ttl: Ttl,
    /// Sweeper schedule (cron or human-readable, e.g. "every minute").
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
}

fn default_sweep_schedule() -> String {
    "every minute".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            half_ttl: Ttl::default(),
            sweep_schedule: default_sweep_schedule(),
        }
    }
}
