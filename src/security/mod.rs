//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → DefaultBodyLimit (reject oversized bodies)
//!     → limits.rs (per-field length bounds, defaults)
//!     → sandbox.rs (path containment for /readfile)
//!     → headers.rs (static security headers on the way out)
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any security check failure
//! - No trust in client input
//! - Rejections carry fixed messages only

pub mod headers;
pub mod limits;
pub mod sandbox;

pub use sandbox::{FileSandbox, SandboxError};
