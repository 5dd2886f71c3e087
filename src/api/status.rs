//! Static endpoints: `/debug`, `/hello`, the disabled `/ping`, and the
//! not-found fallback.

use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct DebugInfo {
    pub debug: bool,
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

/// Fixed health payload. Only compile-time constants go in here.
pub async fn debug() -> Json<DebugInfo> {
    Json(DebugInfo {
        debug: false,
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn hello() -> Json<Greeting> {
    Json(Greeting {
        message: "Welcome to the DevSecOps vulnerable API",
    })
}

/// Command execution is not offered.
pub async fn ping() -> ApiError {
    ApiError::Forbidden("Endpoint not available")
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found")
}
