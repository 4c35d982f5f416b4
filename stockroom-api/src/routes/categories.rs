/// Category CRUD endpoints
///
/// This module provides the category endpoint set. Writes are
/// multipart/form-data so an image file can travel with the fields.
///
/// # Endpoints
///
/// - `GET /categories` - List all categories
/// - `POST /categories` - Create category
/// - `GET /categories/:id` - Fetch one category
/// - `POST|PUT /categories/:id` - Update category (`_method=PUT` accepted)
/// - `DELETE /categories/:id` - Delete category

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    upload::{UploadedImage, CATEGORY_IMAGE_RULES},
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use stockroom_shared::models::category::{Category, CreateCategory};
use validator::Validate;

/// Category list entry with the image rewritten to a public URL
#[derive(Debug, Serialize)]
pub struct CategoryListItem {
    /// Category ID
    pub id: i64,

    /// Category name
    pub name: String,

    /// Absolute image URL, or null when the category has no image
    pub image: Option<String>,
}

/// List categories response
#[derive(Debug, Serialize)]
pub struct ListCategoriesResponse {
    /// All categories
    pub categories: Vec<CategoryListItem>,
}

/// Validated category form fields
#[derive(Debug, Validate)]
struct CategoryPayload {
    /// Category name
    #[validate(length(min = 1, max = 255, message = "The name must be 1-255 characters"))]
    name: String,
}

/// Raw multipart fields of a category form
#[derive(Debug, Default)]
struct CategoryFormData {
    name: Option<String>,
    image: Option<UploadedImage>,
}

/// Drains a category multipart body
///
/// Unknown fields are ignored. `_method` carries the PUT override for
/// browser forms and is consumed without effect.
async fn read_category_form(mut multipart: Multipart) -> ApiResult<CategoryFormData> {
    let mut form = CategoryFormData::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => form.name = Some(field.text().await?),
            "image" => form.image = Some(UploadedImage::from_field(field).await?),
            _ => {
                field.bytes().await?;
            }
        }
    }

    Ok(form)
}

/// List all categories
///
/// Stored image paths are rewritten to absolute URLs; categories without
/// an image carry `null`. No server-side pagination, filtering, or
/// sorting: the admin client works over the full collection in memory.
///
/// # Endpoint
///
/// ```text
/// GET /categories
/// ```
///
/// # Response
///
/// ```json
/// {
///   "categories": [
///     { "id": 1, "name": "Books", "image": "http://localhost:8080/storage/categories/....png" },
///     { "id": 2, "name": "Games", "image": null }
///   ]
/// }
/// ```
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<ListCategoriesResponse>> {
    let categories = Category::list_all(&state.db).await?;

    let categories = categories
        .into_iter()
        .map(|category| CategoryListItem {
            id: category.id,
            name: category.name,
            image: state.image_url(category.image.as_deref()),
        })
        .collect();

    Ok(Json(ListCategoriesResponse { categories }))
}

/// Create a category
///
/// Validates the name (required, at most 255 characters) and the optional
/// image (jpeg/png/gif/webp, at most 5 MB). The image, if present, is
/// stored under `categories/` before the row is inserted.
///
/// # Endpoint
///
/// ```text
/// POST /categories
/// Content-Type: multipart/form-data
///
/// name=Books
/// image=<file>
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Persistence or file-store failure
pub async fn create_category(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let form = read_category_form(multipart).await?;

    let payload = CategoryPayload {
        name: form.name.unwrap_or_default(),
    };
    payload.validate()?;

    let image_path = match &form.image {
        Some(image) => {
            let extension = CATEGORY_IMAGE_RULES.check(image)?;
            Some(state.files.store("categories", extension, &image.bytes).await?)
        }
        None => None,
    };

    let category = Category::create(
        &state.db,
        CreateCategory {
            name: payload.name,
            image: image_path,
        },
    )
    .await?;

    tracing::info!(category_id = category.id, "Created category");
    Ok((StatusCode::CREATED, Json(category)))
}

/// Fetch one category
///
/// Returns the raw row; the image field holds the stored relative path.
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Category>> {
    let category = Category::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

/// Update a category
///
/// Same validation as create. When a replacement image arrives, the old
/// file is deleted from the store (if it is still there) before the new
/// one is written and the row repointed.
///
/// # Errors
///
/// - `404 Not Found`: No category with this ID
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: The save step failed
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<Json<Category>> {
    let form = read_category_form(multipart).await?;

    let payload = CategoryPayload {
        name: form.name.unwrap_or_default(),
    };
    payload.validate()?;

    let category = Category::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    let mut image_path = category.image.clone();
    if let Some(image) = &form.image {
        let extension = CATEGORY_IMAGE_RULES.check(image)?;

        if let Some(old) = &category.image {
            state.files.delete_if_exists(old).await?;
        }

        image_path = Some(state.files.store("categories", extension, &image.bytes).await?);
    }

    let updated = Category::update(&state.db, id, payload.name, image_path).await?;

    tracing::info!(category_id = updated.id, "Updated category");
    Ok(Json(updated))
}

/// Delete a category
///
/// Products referencing the category are removed by the storage-layer
/// cascade. The category's image file is left in place; only product
/// deletion cleans up files.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = Category::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    tracing::info!(category_id = id, "Deleted category");
    Ok(StatusCode::NO_CONTENT)
}
