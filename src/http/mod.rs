//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, JSON body extraction)
//!     → api/* handler (validate, delegate)
//!     → response.rs (success envelope) / error.rs (error envelope)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{present, JsonBody, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
