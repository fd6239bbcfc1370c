//! In-memory user store
//!
//! Default storage implementation using an in-memory hashmap.
//! Suitable for development and tests. Data is lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::info;

use super::{Identity, StorageError, UserStore};

/// In-memory user store implementation
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, Identity>>,
}

impl MemoryUserStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `identities`
    pub fn with_identities(identities: impl IntoIterator<Item = Identity>) -> Self {
        let users = identities
            .into_iter()
            .map(|identity| (identity.id.clone(), identity))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }

    fn poisoned() -> StorageError {
        StorageError::Backend("user store lock poisoned".into())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn add(&self, identity: Identity) -> Result<(), StorageError> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        if users.contains_key(&identity.id) {
            return Err(StorageError::AlreadyExists(identity.id));
        }
        info!(id = %identity.id, username = %identity.username, "Adding user");
        users.insert(identity.id.clone(), identity);
        Ok(())
    }

    async fn find_by_attribute(
        &self,
        name: &str,
        value: &str,
    ) -> Result<Vec<Identity>, StorageError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        let mut found: Vec<Identity> = users
            .values()
            .filter(|identity| identity.attribute(name) == Some(value))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(found)
    }

    async fn count(&self) -> Result<usize, StorageError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.len())
    }
}
