//! In-memory credential store
//!
//! Same uniqueness rules as the MySQL table: username and aadhaar are each
//! unique, ids start at 1 and increase monotonically.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::CredentialStore;
use crate::{Identity, NewIdentity, StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    next_id: u64,
    by_username: HashMap<String, Identity>,
}

/// Process-local credential store
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Inner>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_username.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert_identity(&self, identity: NewIdentity) -> StoreResult<Identity> {
        let mut inner = self.inner.write().await;

        if inner.by_username.contains_key(&identity.username) {
            return Err(StoreError::Duplicate(format!(
                "Duplicate entry '{}' for key 'username'",
                identity.username
            )));
        }
        if inner
            .by_username
            .values()
            .any(|existing| existing.aadhaar == identity.aadhaar)
        {
            return Err(StoreError::Duplicate(format!(
                "Duplicate entry '{}' for key 'aadhaar'",
                identity.aadhaar
            )));
        }

        inner.next_id += 1;
        let record = Identity {
            id: inner.next_id,
            username: identity.username,
            password_hash: identity.password_hash,
            aadhaar: identity.aadhaar,
        };
        inner
            .by_username
            .insert(record.username.clone(), record.clone());

        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Identity>> {
        Ok(self.inner.read().await.by_username.get(username).cloned())
    }

    async fn create_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
