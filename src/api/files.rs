//! `POST /readfile`.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::http::request::JsonBody;
use crate::http::response::{success, Success};
use crate::http::server::AppState;
use crate::security::SandboxError;

#[derive(Debug, Default, Deserialize)]
pub struct ReadFileRequest {
    filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReadFileResponse {
    content: String,
}

pub async fn readfile(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ReadFileRequest>,
) -> ApiResult<Json<Success<ReadFileResponse>>> {
    let filename = request.filename.unwrap_or_default();

    match state.sandbox.read_to_string(&filename).await {
        Ok(content) => Ok(success(ReadFileResponse { content })),
        Err(SandboxError::EmptyName) => Err(ApiError::InvalidInput("Missing filename")),
        Err(SandboxError::InvalidName) => Err(ApiError::InvalidInput("Invalid filename")),
        Err(SandboxError::Escape) => {
            tracing::warn!("Path containment check failed");
            Err(ApiError::Forbidden("Unauthorized"))
        }
        Err(SandboxError::NotFound) => Err(ApiError::NotFound("File not found")),
        Err(e) => {
            tracing::error!(error = %e, "File read failed");
            Err(ApiError::Internal("Read failed"))
        }
    }
}
