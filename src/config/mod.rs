//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: SECRET_KEY, API_*)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → moved into HttpServer, shared with handlers via AppState
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup; handlers never read the environment
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_startup_config, ConfigError};
pub use schema::AppConfig;
pub use schema::FilesConfig;
pub use schema::HashingConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::SecretKey;
pub use schema::StorageConfig;
