//! SQLite-backed credential store.
//!
//! # Design Decisions
//! - Every statement binds its values; none is built by formatting
//! - The pool hands out a connection per statement, nothing is held
//!   across requests
//! - The schema is created on connect if missing

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::auth::credentials::CredentialRecord;
use crate::auth::store::{CredentialStore, StoreError};
use crate::config::StorageConfig;

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY NOT NULL,
    password_hash TEXT NOT NULL
)";

const SELECT_PASSWORD_HASH: &str = "SELECT password_hash FROM users WHERE username = ?";

const INSERT_USER: &str = "INSERT INTO users (username, password_hash) VALUES (?, ?)";

#[derive(Debug, Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Open (creating if needed) the database and ensure the schema exists.
    pub async fn connect(config: &StorageConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        tracing::debug!("Credential store ready");
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn find_password_hash(&self, username: &str) -> Result<Option<String>, StoreError> {
        let hash = sqlx::query_scalar::<_, String>(SELECT_PASSWORD_HASH)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hash)
    }

    async fn insert(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        let result = sqlx::query(INSERT_USER)
            .bind(&record.username)
            .bind(&record.password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::Duplicate),
            Err(e) => Err(StoreError::Database(e)),
        }
    }
}
