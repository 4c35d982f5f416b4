/// API client for the Stockroom backend
///
/// Reads are plain JSON GETs; writes go out as multipart/form-data so an
/// image file can travel with the fields. Updates are POSTs carrying a
/// `_method=PUT` override field, the way browser forms submit them.
///
/// # Example
///
/// ```no_run
/// use stockroom_client::api::{ApiClient, CategoryForm};
///
/// # async fn example() -> Result<(), stockroom_client::error::ClientError> {
/// let client = ApiClient::new("http://localhost:8080");
///
/// let created = client.create_category(CategoryForm {
///     name: "Books".to_string(),
///     image: None,
/// }).await?;
///
/// let categories = client.list_categories().await?;
/// assert!(categories.iter().any(|c| c.id == created.id));
/// # Ok(())
/// # }
/// ```

use crate::error::{ClientError, FieldError};
use crate::types::{CategorySummary, ImageFile, ProductSummary};
use reqwest::multipart;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Form data for creating or updating a category
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    /// Category name
    pub name: String,

    /// Replacement image, if one was picked
    pub image: Option<ImageFile>,
}

/// Form data for creating a product
#[derive(Debug, Clone)]
pub struct ProductForm {
    /// Product name
    pub name: String,

    /// Unit price
    pub price: Decimal,

    /// Optional description
    pub description: Option<String>,

    /// Initial stock level; the server defaults omitted stock to 0
    pub stock: Option<i32>,

    /// Owning category
    pub category_id: i64,

    /// Image, if one was picked
    pub image: Option<ImageFile>,
}

/// Partial update for a product; `None` fields keep their stored values
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    /// New name, if changing
    pub name: Option<String>,

    /// New price, if changing
    pub price: Option<Decimal>,

    /// New description, if changing
    pub description: Option<String>,

    /// New stock level, if changing
    pub stock: Option<i32>,

    /// New owning category, if changing
    pub category_id: Option<i64>,

    /// Replacement image, if one was picked
    pub image: Option<ImageFile>,
}

/// Wire shape of the category list response
#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<CategorySummary>,
}

/// Wire shape of an error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    error: String,
    message: String,
    #[serde(default)]
    details: Option<Vec<FieldError>>,
}

/// Client for the Stockroom REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a non-success response to a `ClientError`
    async fn fail(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();

        match response.json::<ErrorBody>().await {
            Ok(body) => {
                if let Some(details) = body.details {
                    ClientError::Validation(details)
                } else {
                    ClientError::Api {
                        status,
                        message: body.message,
                    }
                }
            }
            Err(_) => ClientError::Api {
                status,
                message: "Unexpected server response".to_string(),
            },
        }
    }

    // --- Categories -----------------------------------------------------

    /// Fetches all categories
    pub async fn list_categories(&self) -> Result<Vec<CategorySummary>, ClientError> {
        let response = self.http.get(self.url("/categories")).send().await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        let envelope: CategoriesEnvelope = response.json().await?;
        Ok(envelope.categories)
    }

    /// Fetches one category by ID
    pub async fn get_category(&self, id: i64) -> Result<CategorySummary, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/categories/{}", id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(response.json().await?)
    }

    /// Creates a category
    pub async fn create_category(
        &self,
        form: CategoryForm,
    ) -> Result<CategorySummary, ClientError> {
        let body = category_multipart(form, false)?;

        let response = self
            .http
            .post(self.url("/categories"))
            .multipart(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(response.json().await?)
    }

    /// Updates a category (POST with `_method=PUT`)
    pub async fn update_category(
        &self,
        id: i64,
        form: CategoryForm,
    ) -> Result<CategorySummary, ClientError> {
        let body = category_multipart(form, true)?;

        let response = self
            .http
            .post(self.url(&format!("/categories/{}", id)))
            .multipart(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(response.json().await?)
    }

    /// Deletes a category
    pub async fn delete_category(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/categories/{}", id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(())
    }

    // --- Products -------------------------------------------------------

    /// Fetches all products
    pub async fn list_products(&self) -> Result<Vec<ProductSummary>, ClientError> {
        let response = self.http.get(self.url("/products")).send().await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetches one product by ID
    pub async fn get_product(&self, id: i64) -> Result<ProductSummary, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/products/{}", id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(response.json().await?)
    }

    /// Creates a product
    pub async fn create_product(&self, form: ProductForm) -> Result<ProductSummary, ClientError> {
        let mut body = multipart::Form::new()
            .text("name", form.name)
            .text("price", form.price.to_string())
            .text("category_id", form.category_id.to_string());

        if let Some(description) = form.description {
            body = body.text("description", description);
        }
        if let Some(stock) = form.stock {
            body = body.text("stock", stock.to_string());
        }
        if let Some(image) = form.image {
            body = body.part("image", image_part(image)?);
        }

        let response = self
            .http
            .post(self.url("/products"))
            .multipart(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(response.json().await?)
    }

    /// Partially updates a product (POST with `_method=PUT`)
    pub async fn update_product(
        &self,
        id: i64,
        patch: ProductPatch,
    ) -> Result<ProductSummary, ClientError> {
        let mut body = multipart::Form::new().text("_method", "PUT");

        if let Some(name) = patch.name {
            body = body.text("name", name);
        }
        if let Some(price) = patch.price {
            body = body.text("price", price.to_string());
        }
        if let Some(description) = patch.description {
            body = body.text("description", description);
        }
        if let Some(stock) = patch.stock {
            body = body.text("stock", stock.to_string());
        }
        if let Some(category_id) = patch.category_id {
            body = body.text("category_id", category_id.to_string());
        }
        if let Some(image) = patch.image {
            body = body.part("image", image_part(image)?);
        }

        let response = self
            .http
            .post(self.url(&format!("/products/{}", id)))
            .multipart(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(response.json().await?)
    }

    /// Deletes a product
    pub async fn delete_product(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/products/{}", id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(())
    }
}

/// Builds a multipart body for a category write
fn category_multipart(
    form: CategoryForm,
    method_override: bool,
) -> Result<multipart::Form, ClientError> {
    let mut body = multipart::Form::new().text("name", form.name);

    if method_override {
        body = body.text("_method", "PUT");
    }
    if let Some(image) = form.image {
        body = body.part("image", image_part(image)?);
    }

    Ok(body)
}

/// Builds the file part for an image upload
fn image_part(image: ImageFile) -> Result<multipart::Part, ClientError> {
    Ok(multipart::Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.mime_type)?)
}
