//! Snake arcade server
//!
//! Serves the browser client and runs one game session per WebSocket connection.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snake_arcade::config::ServerConfig;
use snake_arcade::high_score::JsonFileStore;
use snake_arcade::{server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake_arcade=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let store = Arc::new(JsonFileStore::new(&config.high_score_file));
    info!("High score file: {}", store.path().display());

    let addr = config.bind_address();
    let state = Arc::new(AppState::new(config, store).await);
    let app = server::app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("🐍 Snake server running on http://{}", addr);
    info!("   WebSocket endpoint: ws://{}/ws/snake", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
