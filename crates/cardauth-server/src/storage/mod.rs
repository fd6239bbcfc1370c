//! User storage for the authenticator
//!
//! The authenticator never creates users on its own; it only resolves the
//! platform's unique ID to an identity that already exists in the store.
//! The store is a trait so a directory or database backend can replace the
//! in-memory one.

pub mod lookup;
pub mod memory;

pub use lookup::{IdentityLookup, UNIQUE_ID_ATTRIBUTE};
pub use memory::MemoryUserStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// A user known to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Store-assigned identifier, generated when absent
    #[serde(default = "new_identity_id")]
    pub id: String,
    /// Login name
    pub username: String,
    /// Free-form attributes; the platform's unique ID lives here
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

fn new_identity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Identity {
    /// Create an identity with a generated ID
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: new_identity_id(),
            username: username.into(),
            attributes: HashMap::new(),
        }
    }

    /// Set an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Read an attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Storage backend trait for users
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Add a user
    async fn add(&self, identity: Identity) -> Result<(), StorageError>;

    /// Find every user whose attribute `name` equals `value`
    async fn find_by_attribute(&self, name: &str, value: &str)
        -> Result<Vec<Identity>, StorageError>;

    /// Number of users in the store
    async fn count(&self) -> Result<usize, StorageError>;
}
