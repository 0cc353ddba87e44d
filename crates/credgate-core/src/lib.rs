//! credgate Core - Identity model, credential storage and configuration
//!
//! This crate defines the shared pieces used by the API server and the CLI:
//! - Identity records and the data needed to create one
//! - The `CredentialStore` trait with MySQL and in-memory backends
//! - Store error types
//! - Configuration management

pub mod config;
pub mod store;

pub use config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig, StoreBackend};
pub use store::{CredentialStore, InMemoryCredentialStore, MySqlCredentialStore};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors surfaced by a credential store
#[derive(Error, Debug)]
pub enum StoreError {
    /// A username or aadhaar uniqueness constraint rejected the write
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Duplicate(db_err.message().to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ============================================================================
// Identity Records
// ============================================================================

/// A registered identity as persisted in the `users` table
///
/// `password_hash` is the PHC string produced by the password hasher; the
/// plaintext secret is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Store-assigned identifier
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Secondary unique identifier (12-digit aadhaar number)
    pub aadhaar: String,
}

/// Data required to create a new identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub username: String,
    pub password_hash: String,
    pub aadhaar: String,
}

impl NewIdentity {
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        aadhaar: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            aadhaar: aadhaar.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
