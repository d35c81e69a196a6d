mod api;
mod bootstrap;
mod health;

use std::future::IntoFuture;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use campus_core::config::{AppConfig, LoadOptions};

use crate::bootstrap::Application;

fn init_logging(config: &AppConfig) {
    use campus_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

fn app_router(app: &Application) -> Router {
    api::router(app.runtime.clone())
        .merge(health::router(app.db_pool.clone(), app.runtime.clone()))
}

pub async fn run() -> Result<()> {
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;
    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        "campus-server listening"
    );

    let drain = Duration::from_secs(app.config.server.graceful_shutdown_secs);
    let server = axum::serve(listener, app_router(&app))
        .with_graceful_shutdown(wait_for_shutdown())
        .into_future();

    tokio::select! {
        result = server => result?,
        () = drain_deadline(drain) => {
            tracing::warn!(
                event_name = "system.server.drain_timeout",
                correlation_id = "shutdown",
                drain_secs = drain.as_secs(),
                "in-flight requests did not finish before the drain deadline"
            );
        }
    }

    tracing::info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        "campus-server stopping"
    );
    app.db_pool.close().await;

    Ok(())
}

async fn wait_for_shutdown() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            event_name = "system.server.signal_error",
            correlation_id = "shutdown",
            error = %error,
            "failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
    tracing::info!(
        event_name = "system.server.shutdown_requested",
        correlation_id = "shutdown",
        "shutdown signal received, draining requests"
    );
}

/// Completes `drain` after the shutdown signal; never completes before it.
async fn drain_deadline(drain: Duration) {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(drain).await;
}
