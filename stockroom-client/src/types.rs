/// Wire types shared by the API client and the view logic
///
/// These mirror what the API actually returns. Note the `image` field's
/// dual nature: list endpoints rewrite it to an absolute URL, single-row
/// endpoints return the stored relative path verbatim.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A category row as the client sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category ID
    pub id: i64,

    /// Category name
    pub name: String,

    /// Image URL (list responses) or stored path (single-row responses),
    /// null when the category has no image
    pub image: Option<String>,
}

/// A product row as the client sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Product ID
    pub id: i64,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Decimal,

    /// Description, if any
    pub description: Option<String>,

    /// Units in stock
    pub stock: i32,

    /// Owning category
    pub category_id: i64,

    /// Image URL or stored path, null when the product has no image
    pub image: Option<String>,
}

/// An image file selected in the UI, ready to upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    /// Original file name
    pub file_name: String,

    /// MIME type reported by the file input
    pub mime_type: String,

    /// Raw file bytes
    pub bytes: Vec<u8>,
}
