//! `lessonline check-config`: show the configuration the server would run with.

use console::style;
use serde_json::{Value, json};

use lessonline_core::schedule::normalize_schedule;
use lessonline_types::config::AppConfig;

const REDACTED: &str = "[redacted]";

/// Effective configuration as JSON, secrets replaced by a marker.
pub fn redacted_view(config: &AppConfig) -> Value {
    let secret = |present: bool| if present { json!(REDACTED) } else { Value::Null };
    json!({
        "server": {
            "host": config.server.host,
            "port": config.server.port,
            "public_url": config.server.public_url,
            "link_base": config.server.link_base(),
            "utc_offset_minutes": config.server.utc_offset_minutes,
        },
        "line": {
            "access_token": secret(config.line.access_token.is_some()),
            "channel_secret": secret(config.line.channel_secret.is_some()),
            "api_base": config.line.api_base,
            "data_api_base": config.line.data_api_base,
        },
        "records": {
            "base_url": config.records.base_url,
        },
        "cache": {
            "half_ttl": config.cache.half_ttl,
            "sweep_schedule": config.cache.sweep_schedule,
        },
    })
}

pub fn check_config(config: &AppConfig, json_output: bool) -> anyhow::Result<()> {
    let schedule = normalize_schedule(&config.cache.sweep_schedule);

    if json_output {
        let mut view = redacted_view(config);
        view["cache"]["sweep_cron"] = match &schedule {
            Ok(cron) => json!(cron),
            Err(e) => json!({ "error": e.to_string() }),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let mark = |ok: bool| {
            if ok {
                format!("{}", style("✓").green())
            } else {
                format!("{}", style("✗").red())
            }
        };
        println!();
        println!("  {} Listening on {}:{}", mark(true), config.server.host, config.server.port);
        println!("  {} Delete links use {}", mark(config.server.public_url.is_some()), style(config.server.link_base()).cyan());
        println!("  {} LINE access token", mark(config.line.access_token.is_some()));
        println!("  {} LINE channel secret (signature checks)", mark(config.line.channel_secret.is_some()));
        println!("  {} Lesson records at {}", mark(true), style(&config.records.base_url).cyan());
        println!("  {} Pending halves expire after {}", mark(true), config.cache.half_ttl);
        match &schedule {
            Ok(cron) => println!("  {} Sweeper runs \"{}\" ({cron})", mark(true), config.cache.sweep_schedule),
            Err(e) => println!("  {} Sweeper schedule: {e}", mark(false)),
        }
        println!();
    }

    schedule?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn secrets_are_redacted() {
        let mut config = AppConfig::default();
        config.line.access_token = Some(SecretString::from("very-secret-token"));

        let view = redacted_view(&config);
        let text = view.to_string();

        assert_eq!(view["line"]["access_token"], REDACTED);
        assert!(view["line"]["channel_secret"].is_null());
        assert!(!text.contains("very-secret-token"));
    }

    #[test]
    fn view_includes_cache_settings() {
        let view = redacted_view(&AppConfig::default());
        assert_eq!(view["cache"]["half_ttl"], "one_hour");
        assert_eq!(view["cache"]["sweep_schedule"], "every minute");
        assert_eq!(view["server"]["link_base"], "http://127.0.0.1:8000");
    }

    #[test]
    fn invalid_schedule_is_an_error() {
        let mut config = AppConfig::default();
        config.cache.sweep_schedule = "whenever".to_string();
        assert!(check_config(&config, true).is_err());
    }
}
