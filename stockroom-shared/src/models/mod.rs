/// Database models for Stockroom
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `category`: Catalog categories with an optional image
/// - `product`: Products owned by a category
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
///     name: "Books".to_string(),
///     image: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod category;
pub mod product;
