/// Multipart image extraction and validation
///
/// Both entity endpoints accept an optional `image` part in their
/// multipart bodies. This module pulls the part into memory and checks it
/// against per-entity rules (allowed MIME types, size cap) before anything
/// touches the file store.

use crate::error::{ApiError, ApiResult};
use axum::extract::multipart::{Field, MultipartError};

/// Image upload rules for category endpoints: jpeg/png/gif/webp, 5 MB cap
pub const CATEGORY_IMAGE_RULES: ImageRules = ImageRules {
    max_bytes: 5 * 1024 * 1024,
    allowed: &[
        ("image/jpeg", "jpg"),
        ("image/png", "png"),
        ("image/gif", "gif"),
        ("image/webp", "webp"),
    ],
};

/// Image upload rules for product endpoints: jpeg/png/gif/svg, 2 MB cap
pub const PRODUCT_IMAGE_RULES: ImageRules = ImageRules {
    max_bytes: 2 * 1024 * 1024,
    allowed: &[
        ("image/jpeg", "jpg"),
        ("image/png", "png"),
        ("image/gif", "gif"),
        ("image/svg+xml", "svg"),
    ],
};

/// An uploaded file pulled out of a multipart body
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Client-supplied file name, informational only
    pub file_name: Option<String>,

    /// Declared content type of the part
    pub content_type: Option<String>,

    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Drains a multipart field into an `UploadedImage`
    pub async fn from_field(field: Field<'_>) -> Result<Self, MultipartError> {
        let file_name = field.file_name().map(ToString::to_string);
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = field.bytes().await?.to_vec();

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

/// Validation rules for one entity's image uploads
#[derive(Debug, Clone, Copy)]
pub struct ImageRules {
    /// Maximum accepted file size in bytes
    pub max_bytes: usize,

    /// Accepted (MIME type, stored extension) pairs
    pub allowed: &'static [(&'static str, &'static str)],
}

impl ImageRules {
    /// Checks an upload against the rules and returns the extension to
    /// store the file under
    ///
    /// # Errors
    ///
    /// Returns a 422 validation error on the `image` field when the
    /// content type is missing or not allowed, or when the file exceeds
    /// the size cap.
    pub fn check(&self, image: &UploadedImage) -> ApiResult<&'static str> {
        let content_type = image
            .content_type
            .as_deref()
            .ok_or_else(|| ApiError::validation("image", "The file must be an image"))?;

        let extension = self
            .allowed
            .iter()
            .find(|(mime, _)| mime.eq_ignore_ascii_case(content_type))
            .map(|(_, ext)| *ext)
            .ok_or_else(|| {
                ApiError::validation(
                    "image",
                    format!(
                        "The image must be one of: {}",
                        self.allowed
                            .iter()
                            .map(|(mime, _)| *mime)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
            })?;

        if image.bytes.len() > self.max_bytes {
            return Err(ApiError::validation(
                "image",
                format!(
                    "The image may not be greater than {} kilobytes",
                    self.max_bytes / 1024
                ),
            ));
        }

        Ok(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(content_type: Option<&str>, size: usize) -> UploadedImage {
        UploadedImage {
            file_name: Some("photo.png".to_string()),
            content_type: content_type.map(ToString::to_string),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn test_accepts_allowed_mime_and_maps_extension() {
        let ext = CATEGORY_IMAGE_RULES
            .check(&upload(Some("image/jpeg"), 128))
            .unwrap();
        assert_eq!(ext, "jpg");

        let ext = CATEGORY_IMAGE_RULES
            .check(&upload(Some("image/webp"), 128))
            .unwrap();
        assert_eq!(ext, "webp");
    }

    #[test]
    fn test_rejects_missing_content_type() {
        let err = CATEGORY_IMAGE_RULES.check(&upload(None, 128)).unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_disallowed_mime() {
        let err = CATEGORY_IMAGE_RULES
            .check(&upload(Some("application/pdf"), 128))
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let err = PRODUCT_IMAGE_RULES
            .check(&upload(Some("image/png"), 2 * 1024 * 1024 + 1))
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[test]
    fn test_product_rules_allow_svg_but_not_webp() {
        assert!(PRODUCT_IMAGE_RULES
            .check(&upload(Some("image/svg+xml"), 128))
            .is_ok());
        assert!(PRODUCT_IMAGE_RULES
            .check(&upload(Some("image/webp"), 128))
            .is_err());
    }
}
