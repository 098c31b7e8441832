//! Error types for the HTTP layer and for configuration loading.
//!
//! Every failure a handler can report is an `ApiError`, rendered as a status
//! code plus an `{"error": ...}` body. `NotFound` is separate from the other
//! client errors because the store reports absence as a value, and the handler
//! is the one that turns it into a 404.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::model::ErrorBody;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A client-supplied field failed a precondition.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("Todo not found")]
    NotFound,

    /// The request body was not acceptable JSON for the endpoint.
    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    /// Anything else. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            ApiError::Validation { field, .. } => {
                tracing::warn!(field, "validation failed");
                self.to_string()
            }
            ApiError::InvalidBody(rejection) => {
                tracing::warn!(reason = %rejection.body_text(), "rejected request body");
                self.to_string()
            }
            ApiError::NotFound => self.to_string(),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// A path segment that cannot be decoded can never name a stored todo, so it
/// is reported the same way as an unknown id.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "undecodable path");
        ApiError::NotFound
    }
}

/// Errors raised while reading `ServerConfig` from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}
