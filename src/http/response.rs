//! Response envelope.
//!
//! Success bodies are `{"status":"success", ...payload}`; error bodies come
//! from [`crate::error::ApiError`].

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Success<T> {
    status: &'static str,
    #[serde(flatten)]
    payload: T,
}

/// Wrap `payload` in the success envelope.
pub fn success<T: Serialize>(payload: T) -> Json<Success<T>> {
    Json(Success {
        status: "success",
        payload,
    })
}
