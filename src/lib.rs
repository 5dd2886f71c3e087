//! Hardened HTTP API Library
//!
//! A small set of independent endpoints (credential verification,
//! arithmetic evaluation, password hashing, contained file reads, health)
//! behind one input-validation discipline.

pub mod api;
pub mod auth;
pub mod compute;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::AppConfig;
pub use error::ApiError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
