//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, Argon2 cost within bounds)
//! - Check addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("hashing.memory_kib: must be at least 8 * parallelism ({min}), got {actual}")]
    MemoryCostTooLow { min: u32, actual: u32 },
}

/// Check an [`AppConfig`] for semantic errors.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero { field: "timeouts.request_secs" });
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero { field: "security.max_body_size" });
    }
    if config.storage.max_connections == 0 {
        errors.push(ValidationError::Zero { field: "storage.max_connections" });
    }
    if config.storage.database_url.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "storage.database_url" });
    }
    if config.files.base_dir.as_os_str().is_empty() {
        errors.push(ValidationError::Empty { field: "files.base_dir" });
    }

    let hashing = &config.hashing;
    if hashing.iterations == 0 {
        errors.push(ValidationError::Zero { field: "hashing.iterations" });
    }
    if hashing.parallelism == 0 {
        errors.push(ValidationError::Zero { field: "hashing.parallelism" });
    } else {
        let min = hashing.parallelism.saturating_mul(8);
        if hashing.memory_kib < min {
            errors.push(ValidationError::MemoryCostTooLow {
                min,
                actual: hashing.memory_kib,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
