use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use registrar::config::PortalConfig;
use registrar::server::create_router;
use registrar::types::PortalState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // before tracing so RUST_LOG may come from .env; vars may also be set externally
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PortalConfig::from_env().context("Failed to load configuration")?;
    let state = PortalState::from_config(&config).context("Failed to initialize portal state")?;
    info!(
        local_db = %config.local_db_path,
        remote = state.remote.is_configured(),
        "Portal state initialized"
    );

    let router = create_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no handler available, wait forever instead of shutting down at once
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
