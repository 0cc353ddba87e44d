//! Credential storage
//!
//! The request handler talks to storage only through [`CredentialStore`],
//! so the MySQL pool and the in-memory map are interchangeable.

mod memory;
mod mysql;

pub use memory::InMemoryCredentialStore;
pub use mysql::{MySqlCredentialStore, USERS_TABLE_DDL};

use crate::{Identity, NewIdentity, StoreResult};
use async_trait::async_trait;

/// Trait for identity persistence
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new identity and return it with its assigned id
    ///
    /// Fails with `StoreError::Duplicate` when the username or aadhaar is
    /// already taken.
    async fn insert_identity(&self, identity: NewIdentity) -> StoreResult<Identity>;

    /// Look up an identity by its exact username
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Identity>>;

    /// Create the backing table if it does not exist
    async fn create_schema(&self) -> StoreResult<()>;

    /// Check that the store is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Backend name for logging
    fn name(&self) -> &str;
}
