use std::sync::Arc;

use anyhow::Context;
use golink::{config::AppConfig, coordinator::Coordinator, db::SqliteUrlStore, routes, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ── Entry point ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (ignore error if file is absent; env vars may already be set)
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "golink=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env()?;
    tracing::info!("Starting golink on {}", config.bind_addr());
    tracing::info!("Base URL: {}", config.base_url);

    // Without a store there is nothing to serve
    let store = SqliteUrlStore::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("failed to open store at {}", config.database_url))?;
    tracing::info!("Database migrations applied");

    let coordinator = Coordinator::new(Arc::new(store), config.store_timeout);
    let bind_addr = config.bind_addr();
    let state = Arc::new(AppState {
        coordinator,
        config,
    });

    let app = routes::router(state);

    // ── Serve ──────────────────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
