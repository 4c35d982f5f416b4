/// Client error type
///
/// Failures surface to the UI as transient dismissible banners; there is
/// no retry and no offline queue, so the error type only needs to carry
/// enough to render a message (and field-level details for 422s).

use serde::Deserialize;
use thiserror::Error;

/// A field-level validation message from a 422 response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Errors produced by the API client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or decoding failure from reqwest
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the request with field-level validation errors
    #[error("validation failed: {} errors", .0.len())]
    Validation(Vec<FieldError>),

    /// Any other non-success response
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,

        /// Message from the error body, or a generic fallback
        message: String,
    },
}

impl ClientError {
    /// A short human-readable message for the alert banner
    pub fn banner_message(&self) -> String {
        match self {
            ClientError::Transport(e) => format!("Request failed: {}", e),
            ClientError::Validation(errors) => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Validation failed".to_string()),
            ClientError::Api { message, .. } => message.clone(),
        }
    }
}
