//! `POST /login`.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::auth::{verify_login, CredentialsError, LoginCredentials, Verification};
use crate::error::{ApiError, ApiResult};
use crate::http::request::JsonBody;
use crate::http::response::{success, Success};
use crate::http::server::AppState;

#[derive(Default, Deserialize)]
pub struct LoginRequest {
    username: Option<String>,
    password: Option<Zeroizing<String>>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    user: String,
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<Success<LoginResponse>>> {
    let credentials = LoginCredentials::try_from_parts(
        request.username.as_deref(),
        request.password.as_deref().map(String::as_str),
    )
    .map_err(|e| match e {
        CredentialsError::Missing => ApiError::InvalidInput("Missing username or password"),
        CredentialsError::Oversized => ApiError::InvalidInput("Invalid input format"),
    })?;

    let username = credentials.username().to_owned();
    match verify_login(state.store.as_ref(), state.hasher.clone(), credentials).await {
        Ok(Verification::Verified) => {
            tracing::info!(user = %username, "Login succeeded");
            Ok(success(LoginResponse { user: username }))
        }
        Ok(Verification::Rejected) => {
            tracing::info!("Login rejected");
            Err(ApiError::Unauthorized("Invalid credentials"))
        }
        Err(e) => {
            tracing::error!(error = %e, "Credential verification failed");
            Err(ApiError::Internal("Authentication failed"))
        }
    }
}
