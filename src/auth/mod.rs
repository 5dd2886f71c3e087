//! Credential verification subsystem.
//!
//! # Data Flow
//! ```text
//! username/password
//!     → credentials.rs (presence + length checks)
//!     → store.rs (CredentialStore port, bound-parameter lookup)
//!         └─ sqlite.rs (SQLite adapter) / MemoryCredentialStore
//!     → password.rs (Argon2id verify, on the blocking pool)
//!     → Verified | Rejected
//! ```
//!
//! # Design Decisions
//! - Unknown user and wrong password are indistinguishable to the caller,
//!   including in timing: an unknown user still pays for one verification
//! - Plaintext passwords live in `Zeroizing` buffers and are never logged

pub mod credentials;
pub mod password;
pub mod sqlite;
pub mod store;

use std::sync::Arc;

use thiserror::Error;

pub use credentials::{CredentialRecord, CredentialsError, LoginCredentials};
pub use password::{CredentialHasher, HashError};
pub use sqlite::SqliteCredentialStore;
pub use store::{CredentialStore, MemoryCredentialStore, StoreError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Outcome of a credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Verified,
    Rejected,
}

/// Look up `credentials` and verify the password.
pub async fn verify_login(
    store: &dyn CredentialStore,
    hasher: Arc<CredentialHasher>,
    credentials: LoginCredentials,
) -> Result<Verification, AuthError> {
    let stored = store.find_password_hash(credentials.username()).await?;

    let matched = tokio::task::spawn_blocking(move || match stored {
        Some(hash) => hasher.verify(credentials.password(), &hash),
        None => Ok(hasher.verify_dummy(credentials.password())),
    })
    .await??;

    Ok(if matched { Verification::Verified } else { Verification::Rejected })
}

/// Hash `password` on the blocking pool.
pub async fn hash_password(
    hasher: Arc<CredentialHasher>,
    password: zeroize::Zeroizing<String>,
) -> Result<String, AuthError> {
    let hashed = tokio::task::spawn_blocking(move || hasher.hash(password.as_str())).await??;
    Ok(hashed)
}
