//! Validated login input and stored credential records.

use std::fmt;

use zeroize::Zeroizing;

use crate::security::limits::{non_empty, within_len, MAX_PASSWORD_LEN, MAX_USERNAME_LEN};

/// Why a username/password pair was refused before any lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsError {
    /// Username or password absent or empty.
    Missing,
    /// Username over 50 or password over 255 characters.
    Oversized,
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "username and password are required"),
            Self::Oversized => write!(f, "username or password exceeds its length limit"),
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Username and password that passed the length checks.
///
/// The password is wiped from memory on drop and never appears in `Debug`.
#[derive(Clone)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsError> {
        let (Some(username), Some(password)) = (non_empty(username), non_empty(password)) else {
            return Err(CredentialsError::Missing);
        };
        if !within_len(username, 1, MAX_USERNAME_LEN) || !within_len(password, 1, MAX_PASSWORD_LEN) {
            return Err(CredentialsError::Oversized);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A row of the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: String,
    pub password_hash: String,
}
