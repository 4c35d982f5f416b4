/// Category model and database operations
///
/// Categories are the top level of the catalog: each category owns zero or
/// more products, and deleting a category cascades to its products at the
/// storage layer.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     image VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `image` is a path relative to the public file root, or NULL when the
/// category has no image. `name` is not unique at the database layer.
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::models::category::{Category, CreateCategory};
/// use stockroom_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let category = Category::create(&pool, CreateCategory {
///     name: "Electronics".to_string(),
///     image: Some("categories/picture1.png".to_string()),
/// }).await?;
///
/// let found = Category::find_by_id(&pool, category.id).await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Category model representing a catalog category
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID
    pub id: i64,

    /// Category name (not unique at the database layer)
    pub name: String,

    /// Image path relative to the public file root, if any
    pub image: Option<String>,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last updated
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new category
#[derive(Debug, Clone)]
pub struct CreateCategory {
    /// Category name
    pub name: String,

    /// Stored image path, if an image was uploaded
    pub image: Option<String>,
}

impl Category {
    /// Creates a new category
    pub async fn create(pool: &PgPool, data: CreateCategory) -> Result<Self, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, image)
            VALUES ($1, $2)
            RETURNING id, name, image, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.image)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Finds a category by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, image, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }

    /// Lists all categories, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, image, created_at, updated_at
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }

    /// Checks whether a category with the given ID exists
    ///
    /// Used to validate `category_id` references before inserting products.
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(row.0)
    }

    /// Updates a category's name and image path
    ///
    /// `image` is the full new value for the column: callers that keep the
    /// existing image pass it back unchanged.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        name: String,
        image: Option<String>,
    ) -> Result<Self, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, image = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(image)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Deletes a category by ID
    ///
    /// Products referencing the category are removed by the ON DELETE
    /// CASCADE constraint. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
