//! `POST /compute`.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::compute::{evaluate, Number};
use crate::error::{ApiError, ApiResult};
use crate::http::request::{present, JsonBody};
use crate::http::response::{success, Success};
use crate::security::limits::DEFAULT_EXPRESSION;

#[derive(Debug, Default, Deserialize)]
pub struct ComputeRequest {
    #[serde(default, deserialize_with = "present")]
    expression: Option<Option<String>>,
}

#[derive(Debug, Serialize)]
pub struct ComputeResponse {
    result: Number,
}

pub async fn compute(
    JsonBody(request): JsonBody<ComputeRequest>,
) -> ApiResult<Json<Success<ComputeResponse>>> {
    let expression = match request.expression {
        None => DEFAULT_EXPRESSION.to_string(),
        Some(Some(expression)) => expression,
        Some(None) => return Err(ApiError::InvalidInput("Invalid expression")),
    };
    match evaluate(&expression) {
        Ok(result) => Ok(success(ComputeResponse { result })),
        Err(e) => {
            tracing::debug!(error = %e, "Expression rejected");
            Err(ApiError::InvalidInput("Invalid expression"))
        }
    }
}
