//! Configuration loader for lessonline.
//!
//! Reads a TOML file into [`AppConfig`], falling back to defaults when the
//! file is missing or malformed, then applies environment overrides.

use std::path::Path;

use lessonline_types::config::AppConfig;
use secrecy::SecretString;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lessonline.toml";

pub const ENV_HOST: &str = "LESSONLINE_HOST";
pub const ENV_PORT: &str = "LESSONLINE_PORT";
pub const ENV_PUBLIC_URL: &str = "LESSONLINE_PUBLIC_URL";
pub const ENV_RECORDS_URL: &str = "LESSONLINE_RECORDS_URL";
pub const ENV_LINE_ACCESS_TOKEN: &str = "LINE_ACCESS_TOKEN";
pub const ENV_LINE_CHANNEL_SECRET: &str = "LINE_CHANNEL_SECRET";

/// Load configuration from `path` and the process environment.
///
/// - Missing file: defaults.
/// - Unreadable or malformed file: warning, defaults.
/// - Environment variables override file values.
pub async fn load_config(path: &Path) -> AppConfig {
    let mut config = load_file(path).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

async fn load_file(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Apply overrides from `lookup` (the environment in production).
///
/// Empty values are treated as unset. An unparsable port is ignored with a
/// warning.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = get(ENV_HOST) {
        config.server.host = host;
    }
    if let Some(port) = get(ENV_PORT) {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!("Ignoring invalid {ENV_PORT}={port}"),
        }
    }
    if let Some(url) = get(ENV_PUBLIC_URL) {
        config.server.public_url = Some(url);
    }
    if let Some(url) = get(ENV_RECORDS_URL) {
        config.records.base_url = url;
    }
    if let Some(token) = get(ENV_LINE_ACCESS_TOKEN) {
        config.line.access_token = Some(SecretString::from(token));
    }
    if let Some(secret) = get(ENV_LINE_CHANNEL_SECRET) {
        config.line.channel_secret = Some(SecretString::from(secret));
    }
}
