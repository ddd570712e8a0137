//! Exposure Error Types
//!
//! Unified error type for registry and analytics operations, with a direct
//! mapping onto HTTP responses.

use thiserror::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response, Json},
};
use utoipa::ToSchema;

/// Errors surfaced by the exposure service
#[derive(Error, Debug)]
pub enum ExposureError {
    #[error("Subscription not found: {af_id}/{subscription_id}")]
    NotFound {
        af_id: String,
        subscription_id: String,
    },

    #[error("Generated subscription id already in use: {subscription_id}")]
    AlreadyExists { subscription_id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl ExposureError {
    pub fn not_found(af_id: impl Into<String>, subscription_id: impl Into<String>) -> Self {
        Self::NotFound {
            af_id: af_id.into(),
            subscription_id: subscription_id.into(),
        }
    }

    pub fn already_exists(subscription_id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            subscription_id: subscription_id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for exposure operations
pub type Result<T> = std::result::Result<T, ExposureError>;

/// Error response body returned by the HTTP API
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable error code
    pub error: String,
    /// Human-readable error description
    pub message: String,
}

impl IntoResponse for ExposureError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ExposureError::NotFound { .. } => (StatusCode::NOT_FOUND, "SUBSCRIPTION_NOT_FOUND"),
            ExposureError::AlreadyExists { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ID_COLLISION")
            }
            ExposureError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        };

        let body = ErrorResponse {
            error: code.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
