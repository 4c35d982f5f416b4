/// Product model and database operations
///
/// Products are catalog items owned by a category. Prices are NUMERIC(8, 2)
/// in the database and `rust_decimal::Decimal` in Rust so that two
/// fractional digits survive round trips without float drift.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE products (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     price NUMERIC(8, 2) NOT NULL,
///     description TEXT,
///     stock INTEGER NOT NULL DEFAULT 0,
///     category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
///     image VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::models::product::{Product, CreateProduct};
/// use stockroom_shared::db::pool::{create_pool, DatabaseConfig};
/// use rust_decimal::Decimal;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let product = Product::create(&pool, CreateProduct {
///     name: "Paperback".to_string(),
///     price: Decimal::new(1050, 2), // 10.50
///     description: None,
///     stock: 3,
///     category_id: 1,
///     image: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Product model representing a catalog item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID
    pub id: i64,

    /// Product name
    pub name: String,

    /// Unit price, two fractional digits
    pub price: Decimal,

    /// Free-form description, if any
    pub description: Option<String>,

    /// Units in stock
    pub stock: i32,

    /// Owning category
    pub category_id: i64,

    /// Image path relative to the public file root, if any
    pub image: Option<String>,

    /// When the product was created
    pub created_at: DateTime<Utc>,

    /// When the product was last updated
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new product
#[derive(Debug, Clone)]
pub struct CreateProduct {
    /// Product name
    pub name: String,

    /// Unit price
    pub price: Decimal,

    /// Optional description
    pub description: Option<String>,

    /// Initial stock level
    pub stock: i32,

    /// Owning category (must exist)
    pub category_id: i64,

    /// Stored image path, if an image was uploaded
    pub image: Option<String>,
}

/// Partial update for a product
///
/// Every field is optional; `None` keeps the stored value. There is no way
/// to null out a field through an update, matching the admin form contract.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    /// New name, if changing
    pub name: Option<String>,

    /// New price, if changing
    pub price: Option<Decimal>,

    /// New description, if changing
    pub description: Option<String>,

    /// New stock level, if changing
    pub stock: Option<i32>,

    /// New owning category, if changing (must exist)
    pub category_id: Option<i64>,

    /// New stored image path, if a replacement image was uploaded
    pub image: Option<String>,
}

impl Product {
    /// Creates a new product
    pub async fn create(pool: &PgPool, data: CreateProduct) -> Result<Self, sqlx::Error> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, description, stock, category_id, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, price, description, stock, category_id, image,
                      created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.price)
        .bind(data.description)
        .bind(data.stock)
        .bind(data.category_id)
        .bind(data.image)
        .fetch_one(pool)
        .await?;

        Ok(product)
    }

    /// Finds a product by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, description, stock, category_id, image,
                   created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Lists all products, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, description, stock, category_id, image,
                   created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    /// Applies a partial update, keeping stored values for omitted fields
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateProduct,
    ) -> Result<Self, sqlx::Error> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                stock = COALESCE($5, stock),
                category_id = COALESCE($6, category_id),
                image = COALESCE($7, image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, price, description, stock, category_id, image,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.price)
        .bind(data.description)
        .bind(data.stock)
        .bind(data.category_id)
        .bind(data.image)
        .fetch_one(pool)
        .await?;

        Ok(product)
    }

    /// Deletes a product by ID
    ///
    /// Returns `true` if a row was deleted. Callers are responsible for
    /// removing the product's image file from the file store first.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
