/// Product CRUD endpoints
///
/// This module provides the product endpoint set. Writes are
/// multipart/form-data so an image file can travel with the fields; all
/// text fields arrive as strings and are parsed here.
///
/// # Endpoints
///
/// - `GET /products` - List all products
/// - `POST /products` - Create product
/// - `GET /products/:id` - Fetch one product
/// - `POST|PUT /products/:id` - Partial update (`_method=PUT` accepted)
/// - `DELETE /products/:id` - Delete product and its image file

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    upload::{UploadedImage, PRODUCT_IMAGE_RULES},
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use stockroom_shared::models::{
    category::Category,
    product::{CreateProduct, Product, UpdateProduct},
};
use validator::Validate;

/// Product list entry with the image rewritten to a public URL
#[derive(Debug, Serialize)]
pub struct ProductListItem {
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

    /// Absolute image URL, or null when the product has no image
    pub image: Option<String>,
}

/// Validated product form fields (the ones `validator` can express)
#[derive(Debug, Validate)]
struct ProductPayload {
    /// Product name
    #[validate(length(min = 1, max = 255, message = "The name must be 1-255 characters"))]
    name: String,
}

/// Raw multipart fields of a product form
///
/// Empty text fields are normalized to `None`, the way browser forms
/// submit untouched inputs.
#[derive(Debug, Default)]
struct ProductFormData {
    name: Option<String>,
    price: Option<String>,
    description: Option<String>,
    stock: Option<String>,
    category_id: Option<String>,
    image: Option<UploadedImage>,
}

/// Drains a product multipart body
async fn read_product_form(mut multipart: Multipart) -> ApiResult<ProductFormData> {
    let mut form = ProductFormData::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => form.name = non_empty(field.text().await?),
            "price" => form.price = non_empty(field.text().await?),
            "description" => form.description = non_empty(field.text().await?),
            "stock" => form.stock = non_empty(field.text().await?),
            "category_id" => form.category_id = non_empty(field.text().await?),
            "image" => form.image = Some(UploadedImage::from_field(field).await?),
            _ => {
                field.bytes().await?;
            }
        }
    }

    Ok(form)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Parses a price field: numeric, non-negative, two fractional digits
fn parse_price(raw: &str) -> ApiResult<Decimal> {
    let price: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::validation("price", "The price must be a number"))?;

    if price < Decimal::ZERO {
        return Err(ApiError::validation("price", "The price must be at least 0"));
    }

    Ok(price.round_dp(2))
}

/// Parses a stock field into an integer
fn parse_stock(raw: &str) -> ApiResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::validation("stock", "The stock must be an integer"))
}

/// Parses and checks a category reference
///
/// The referenced category must exist; a dangling ID is a validation
/// error, not a 404, because the category is form input rather than the
/// addressed resource.
async fn parse_category_id(state: &AppState, raw: &str) -> ApiResult<i64> {
    let category_id: i64 = raw.trim().parse().map_err(|_| {
        ApiError::validation("category_id", "The category id must be an integer")
    })?;

    if !Category::exists(&state.db, category_id).await? {
        return Err(ApiError::validation(
            "category_id",
            "The selected category id is invalid",
        ));
    }

    Ok(category_id)
}

/// List all products
///
/// Rows are returned verbatim except for `image`, which is rewritten to
/// an absolute URL (or null).
///
/// # Endpoint
///
/// ```text
/// GET /products
/// ```
pub async fn list_products(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProductListItem>>> {
    let products = Product::list_all(&state.db).await?;

    let products = products
        .into_iter()
        .map(|product| ProductListItem {
            id: product.id,
            name: product.name,
            price: product.price,
            description: product.description,
            stock: product.stock,
            category_id: product.category_id,
            image: state.image_url(product.image.as_deref()),
        })
        .collect();

    Ok(Json(products))
}

/// Create a product
///
/// Validates the name (required, at most 255 characters), the price
/// (required, numeric, non-negative), the category reference (required,
/// must exist) and the optional image (jpeg/png/gif/svg, at most 2 MB).
/// Stock defaults to 0 when omitted. Nothing is persisted when any check
/// fails.
///
/// # Endpoint
///
/// ```text
/// POST /products
/// Content-Type: multipart/form-data
///
/// name=Paperback
/// price=10.50
/// description=A paperback book
/// stock=3
/// category_id=1
/// image=<file>
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Persistence or file-store failure
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let form = read_product_form(multipart).await?;

    let payload = ProductPayload {
        name: form.name.unwrap_or_default(),
    };
    payload.validate()?;

    let price = match &form.price {
        Some(raw) => parse_price(raw)?,
        None => return Err(ApiError::validation("price", "The price field is required")),
    };

    let category_id = match &form.category_id {
        Some(raw) => parse_category_id(&state, raw).await?,
        None => {
            return Err(ApiError::validation(
                "category_id",
                "The category id field is required",
            ))
        }
    };

    let stock = match &form.stock {
        Some(raw) => parse_stock(raw)?,
        None => 0,
    };

    let image_path = match &form.image {
        Some(image) => {
            let extension = PRODUCT_IMAGE_RULES.check(image)?;
            Some(state.files.store("products", extension, &image.bytes).await?)
        }
        None => None,
    };

    let product = Product::create(
        &state.db,
        CreateProduct {
            name: payload.name,
            price,
            description: form.description,
            stock,
            category_id,
            image: image_path,
        },
    )
    .await?;

    tracing::info!(product_id = product.id, "Created product");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Fetch one product
///
/// Returns the raw row; the image field holds the stored relative path.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Product>> {
    let product = Product::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

/// Update a product
///
/// Every field is optional; omitted fields keep their stored values. When
/// a replacement image arrives, the old file is deleted from the store
/// before the new one is written.
///
/// # Errors
///
/// - `404 Not Found`: No product with this ID
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<Json<Product>> {
    let form = read_product_form(multipart).await?;

    if let Some(name) = &form.name {
        let payload = ProductPayload { name: name.clone() };
        payload.validate()?;
    }

    let price = match &form.price {
        Some(raw) => Some(parse_price(raw)?),
        None => None,
    };

    let category_id = match &form.category_id {
        Some(raw) => Some(parse_category_id(&state, raw).await?),
        None => None,
    };

    let stock = match &form.stock {
        Some(raw) => Some(parse_stock(raw)?),
        None => None,
    };

    let product = Product::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    let image_path = match &form.image {
        Some(image) => {
            let extension = PRODUCT_IMAGE_RULES.check(image)?;

            if let Some(old) = &product.image {
                state.files.delete(old).await?;
            }

            Some(state.files.store("products", extension, &image.bytes).await?)
        }
        None => None,
    };

    let updated = Product::update(
        &state.db,
        id,
        UpdateProduct {
            name: form.name,
            price,
            description: form.description,
            stock,
            category_id,
            image: image_path,
        },
    )
    .await?;

    tracing::info!(product_id = updated.id, "Updated product");
    Ok(Json(updated))
}

/// Delete a product
///
/// Removes the product's image file from the store (if any), then the
/// row. The two deletions are not atomic.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let product = Product::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    if let Some(image) = &product.image {
        state.files.delete(image).await?;
    }

    Product::delete(&state.db, id).await?;

    tracing::info!(product_id = id, "Deleted product");
    Ok(StatusCode::NO_CONTENT)
}
