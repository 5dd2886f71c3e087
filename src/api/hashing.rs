//! `POST /hash`.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::auth::hash_password;
use crate::error::{ApiError, ApiResult};
use crate::http::request::{present, JsonBody};
use crate::http::response::{success, Success};
use crate::http::server::AppState;
use crate::security::limits::{within_len, DEFAULT_HASH_PASSWORD, MAX_PASSWORD_LEN};

#[derive(Default, Deserialize)]
pub struct HashRequest {
    #[serde(default, deserialize_with = "present")]
    password: Option<Option<Zeroizing<String>>>,
}

#[derive(Debug, Serialize)]
pub struct HashResponse {
    hashed: String,
}

pub async fn hash(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<HashRequest>,
) -> ApiResult<Json<Success<HashResponse>>> {
    let password = match request.password {
        None => Zeroizing::new(DEFAULT_HASH_PASSWORD.to_string()),
        Some(Some(password)) => password,
        Some(None) => return Err(ApiError::InvalidInput("Invalid password")),
    };

    if !within_len(&password, 1, MAX_PASSWORD_LEN) {
        return Err(ApiError::InvalidInput("Invalid password"));
    }

    match hash_password(state.hasher.clone(), password).await {
        Ok(hashed) => Ok(success(HashResponse { hashed })),
        Err(e) => {
            tracing::error!(error = %e, "Password hashing failed");
            Err(ApiError::Internal("Hashing failed"))
        }
    }
}
