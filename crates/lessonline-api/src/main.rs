//! lessonline CLI and webhook server entry point.
//!
//! Binary name: `lessonline`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then runs the
//! requested command.

mod cli;
mod http;
mod state;

use clap::Parser;
use lessonline_infra::config::load_config;
use lessonline_observe::tracing_setup::{
    TracingOptions, filter_for_verbosity, init_tracing, shutdown_tracing,
};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
        json: cli.json,
        otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let mut config = load_config(&cli.config).await;

    let result = match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cli::serve::serve(config, cli.quiet || cli.json).await
        }
        Commands::CheckConfig => cli::check_config::check_config(&config, cli.json),
    };

    shutdown_tracing();
    result
}
