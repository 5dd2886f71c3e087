//! Endpoint handlers.
//!
//! # Routes
//! ```text
//! POST /login     → auth.rs      credential verification
//! POST /ping      → status.rs    disabled, always 403
//! POST /compute   → compute.rs   sandboxed arithmetic
//! POST /hash      → hashing.rs   Argon2id hashing
//! POST /readfile  → files.rs     contained file read
//! GET  /debug     → status.rs    static health payload
//! GET  /hello     → status.rs    greeting
//! ```
//!
//! # Design Decisions
//! - Each handler validates its own input; nothing is shared between them
//! - Handlers log the cause of a failure and return a fixed message

pub mod auth;
pub mod compute;
pub mod files;
pub mod hashing;
pub mod status;

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::server::AppState;

/// Route table for every endpoint.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/ping", post(status::ping))
        .route("/compute", post(compute::compute))
        .route("/hash", post(hashing::hash))
        .route("/readfile", post(files::readfile))
        .route("/debug", get(status::debug))
        .route("/hello", get(status::hello))
}
