//! CLI definitions for the `lessonline` binary.

pub mod check_config;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// LINE bot that records lesson notes from a text and a book photo.
#[derive(Parser)]
#[command(name = "lessonline", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Machine-readable output: JSON logs, JSON from `check-config`.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to the TOML config file.
    #[arg(long, global = true, env = "LESSONLINE_CONFIG", default_value = "lessonline.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the webhook server.
    Serve {
        /// Address to bind (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Print the effective configuration with secrets redacted.
    CheckConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "lessonline", "-vv", "--config", "/etc/lessonline.toml", "serve", "--port", "9000",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, PathBuf::from("/etc/lessonline.toml"));
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
            }
            Commands::CheckConfig => panic!("expected serve"),
        }
    }

    #[test]
    fn parses_check_config_json() {
        let cli = Cli::try_parse_from(["lessonline", "check-config", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::CheckConfig));
    }
}
