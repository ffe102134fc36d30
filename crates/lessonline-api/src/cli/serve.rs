//! `lessonline serve`: run the webhook server and the cache sweeper.

use std::sync::Arc;

use lessonline_core::cache::Sweeper;
use lessonline_core::schedule::PeriodicScheduler;
use lessonline_types::config::AppConfig;

use crate::http;
use crate::state::AppState;

pub async fn serve(config: AppConfig, quiet: bool) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;

    let scheduler = PeriodicScheduler::new();
    scheduler.start().await?;
    Arc::new(Sweeper::new(Arc::clone(&state.store)))
        .register(&scheduler, &config.cache.sweep_schedule)
        .await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, half_ttl = %config.cache.half_ttl, "webhook server listening");
    if !quiet {
        println!(
            "  {} lessonline listening on {}",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!(
            "  {} webhook URL: {}",
            console::style("↪").bold(),
            console::style(format!("{}/line/webhook", config.server.link_base())).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.stop().await?;
    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
