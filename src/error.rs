//! API error taxonomy and its HTTP mapping.
//!
//! Every variant carries a fixed `&'static str`, so nothing dynamic (error
//! chains, paths, user input) can end up in a response body. Handlers log
//! the underlying cause before converting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed, missing or oversized input.
    #[error("{0}")]
    InvalidInput(&'static str),

    /// Failed authentication.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Request refused (disabled endpoint, containment breach).
    #[error("{0}")]
    Forbidden(&'static str),

    /// Requested resource does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// Body exceeded the configured limit.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// Handler did not finish within the request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Unexpected failure; detail stays in the logs.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for the rejection metric.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::PayloadTooLarge => "payload_too_large",
            ApiError::Timeout => "timeout",
            ApiError::Internal(_) => "internal",
        }
    }
}

/// Error body: `{"status":"error","message":...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        crate::observability::metrics::record_rejection(self.kind());
        let body = ErrorBody {
            status: "error",
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Convenient result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
