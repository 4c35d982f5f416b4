/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use stockroom_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = stockroom_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use stockroom_shared::storage::FileStore;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Public file store for uploaded images
    pub files: FileStore,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        let files = FileStore::new(config.storage.root.clone());
        Self {
            db,
            files,
            config: Arc::new(config),
        }
    }

    /// Base URL used when rewriting stored image paths to absolute URLs
    pub fn public_base_url(&self) -> &str {
        &self.config.storage.public_base_url
    }

    /// Rewrites a stored relative image path to its public URL
    pub fn image_url(&self, relative: Option<&str>) -> Option<String> {
        relative.map(|path| self.files.url_for(self.public_base_url(), path))
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                   # Health check
/// ├── /storage/*                # Uploaded files (static)
/// ├── /categories               # GET list, POST create
/// ├── /categories/:id           # GET, POST/PUT update, DELETE
/// ├── /products                 # GET list, POST create
/// └── /products/:id             # GET, POST/PUT update, DELETE
/// ```
///
/// Updates accept POST with a `_method=PUT` form field in addition to the
/// PUT verb, because browser multipart forms cannot issue PUT directly.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
///
/// There is no authentication layer; every request is handled as-is.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let category_routes = Router::new()
        .route(
            "/categories",
            get(routes::categories::list_categories).post(routes::categories::create_category),
        )
        .route(
            "/categories/:id",
            get(routes::categories::get_category)
                .post(routes::categories::update_category)
                .put(routes::categories::update_category)
                .delete(routes::categories::delete_category),
        );

    let product_routes = Router::new()
        .route(
            "/products",
            get(routes::products::list_products).post(routes::products::create_product),
        )
        .route(
            "/products/:id",
            get(routes::products::get_product)
                .post(routes::products::update_product)
                .put(routes::products::update_product)
                .delete(routes::products::delete_product),
        );

    // Uploaded files are served straight off disk under /storage, matching
    // the URLs produced by the list endpoints.
    let storage_service = ServeDir::new(state.files.root().to_path_buf());

    // The admin SPA is served from its own origin during development, so
    // the API answers cross-origin requests permissively.
    let cors = CorsLayer::permissive();

    Router::new()
        .merge(health_routes)
        .merge(category_routes)
        .merge(product_routes)
        .nest_service("/storage", storage_service)
        // Axum's default 2 MB body cap would cut off category uploads
        // before validation; the per-entity size rules run in the handlers.
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
