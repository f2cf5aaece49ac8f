mod config;
mod error;
mod handlers;
mod router;
mod state;

use clap::Parser;
use config::{GatewayConfig, init_logging};
use matching_engine::MatchingEngine;
use router::create_router;
use state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = GatewayConfig::parse();
    init_logging("gateway", config.log_format)?;

    tracing::info!("Starting Gateway API service");

    let engine = MatchingEngine::new(config.engine_config());
    let app = create_router(AppState::new(engine));

    let listener = TcpListener::bind(config.bind).await?;

    tracing::info!("Listening on {}", config.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
