// crates/server/src/main.rs
//! BhoomiSetu AI server binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use bhoomi_ai_core::LocalGenerator;
use bhoomi_ai_server::{create_app, logging, metrics, AppState, Config};
use clap::Parser;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::init_tracing(&config.log_level)?;
    metrics::init_metrics();

    let state = AppState::new(Arc::new(LocalGenerator::new()), config.retention());
    let sweeper = state.jobs.spawn_sweeper(config.sweep_interval());

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, version = env!("CARGO_PKG_VERSION"), "BhoomiSetu AI service listening");

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    sweeper.abort();
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
