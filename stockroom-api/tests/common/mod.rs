/// Shared test harness for API integration tests
///
/// Builds the full router against a real database (DATABASE_URL must be
/// set, e.g. a local PostgreSQL) and a throwaway file-store directory.
/// Tests create their own uniquely-named rows and assert only on those,
/// so suites can run concurrently against one database.

use axum::Router;
use std::path::PathBuf;
use stockroom_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, StorageConfig},
};
use stockroom_shared::db::{migrations, pool};
use tempfile::TempDir;

/// Everything a test needs: the router, the pool, and the storage root
pub struct TestContext {
    /// Database pool, for direct assertions
    pub db: sqlx::PgPool,

    /// The full application router
    pub app: Router,

    /// Throwaway file-store root; dropped (and deleted) with the context
    pub storage: TempDir,
}

impl TestContext {
    /// Connects, migrates, and builds the router
    pub async fn new() -> anyhow::Result<Self> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set for integration tests"))?;

        let db = pool::create_pool(pool::DatabaseConfig {
            url: url.clone(),
            max_connections: 5,
            ..Default::default()
        })
        .await?;

        migrations::run_migrations(&db).await?;

        let storage = TempDir::new()?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            storage: StorageConfig {
                root: storage.path().to_string_lossy().into_owned(),
                public_base_url: "http://localhost:8080".to_string(),
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(Self { db, app, storage })
    }

    /// Absolute path of a stored relative path in this context's store
    pub fn stored_path(&self, relative: &str) -> PathBuf {
        self.storage.path().join(relative)
    }

    /// Whether a stored relative path currently exists on disk
    pub fn file_exists(&self, relative: &str) -> bool {
        self.stored_path(relative).exists()
    }
}

/// Boundary used by the hand-built multipart bodies below
pub const BOUNDARY: &str = "stockroom-test-boundary";

/// Builds a multipart/form-data body from text fields and an optional
/// file part `(field, filename, content_type, bytes)`
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((name, filename, content_type, bytes)) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// The content-type header value matching `multipart_body`
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// A name unique to this test run
pub fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock is after the epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}
