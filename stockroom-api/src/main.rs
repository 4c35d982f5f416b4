//! # Stockroom API Server
//!
//! This is the API server for Stockroom, a small e-commerce admin backend
//! providing category and product CRUD with image upload.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - Category endpoints (list, create, fetch, update, delete)
//! - Product endpoints (list, create, fetch, partial update, delete)
//! - Multipart image upload backed by a public file store
//! - Static serving of uploaded files under `/storage`
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/stockroom cargo run -p stockroom-api
//! ```

use stockroom_api::{app, config::Config};
use stockroom_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockroom_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Stockroom API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let bind_address = config.bind_address();
    let state = app::AppState::new(db, config);
    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when ctrl-c is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    } else {
        tracing::info!("Shutdown signal received, exiting...");
    }
}
