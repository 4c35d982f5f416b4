//! Seeds the database with demo catalog data.
//!
//! Inserts a handful of categories and products for local development.
//! Safe to run repeatedly; every run inserts fresh rows.
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/stockroom cargo run -p stockroom-api --bin stockroom-seed
//! ```

use rust_decimal::Decimal;
use stockroom_api::config::Config;
use stockroom_shared::db::{migrations, pool};
use stockroom_shared::models::{
    category::{Category, CreateCategory},
    product::{CreateProduct, Product},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let category_names = ["Electronics", "Clothing", "Furniture", "Books"];
    let mut first_category_id = None;

    for name in category_names {
        let category = Category::create(
            &db,
            CreateCategory {
                name: name.to_string(),
                image: None,
            },
        )
        .await?;
        first_category_id.get_or_insert(category.id);
        tracing::info!(category_id = category.id, name, "Seeded category");
    }

    let category_id = first_category_id.expect("at least one category was seeded");

    let demo_products = [
        ("Product A", Decimal::new(10050, 2)),
        ("Product B", Decimal::new(15075, 2)),
        ("Product C", Decimal::new(20000, 2)),
    ];

    for (name, price) in demo_products {
        let product = Product::create(
            &db,
            CreateProduct {
                name: name.to_string(),
                price,
                description: None,
                stock: 0,
                category_id,
                image: None,
            },
        )
        .await?;
        tracing::info!(product_id = product.id, name, "Seeded product");
    }

    tracing::info!("Seeding complete");
    Ok(())
}
