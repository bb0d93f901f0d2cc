use clap::Parser;
use tracing_subscriber::EnvFilter;

use ruleval::{
    config::ServerConfig,
    server::{router, AppState},
};

async fn shutdown_signal() {
    // Serve until interrupted
    let _ = tokio::signal::ctrl_c().await;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    let state = AppState::new(config.isolate_requests);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;

    tracing::info!(
        listen = %config.listen,
        isolate_requests = config.isolate_requests,
        "rule evaluation server listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
