//! Credential store port and its in-memory adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::credentials::CredentialRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("user already exists")]
    Duplicate,

    #[error("store lock poisoned")]
    Poisoned,
}

/// Lookup interface over the credential table.
///
/// Implementations must bind `username` as a parameter, never splice it
/// into query text.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stored hash for an exact username match.
    async fn find_password_hash(&self, username: &str) -> Result<Option<String>, StoreError>;

    /// Add a new record. Fails with [`StoreError::Duplicate`] if the username exists.
    async fn insert(&self, record: &CredentialRecord) -> Result<(), StoreError>;
}

/// Process-local store for tests and development.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_password_hash(&self, username: &str) -> Result<Option<String>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(username).cloned())
    }

    async fn insert(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        if records.contains_key(&record.username) {
            return Err(StoreError::Duplicate);
        }
        records.insert(record.username.clone(), record.password_hash.clone());
        Ok(())
    }
}
