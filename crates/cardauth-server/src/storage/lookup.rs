//! Identity lookup by the platform's unique ID

use std::sync::Arc;
use tracing::{debug, warn};

use cardauth_core::{AuthError, Result};

use super::{Identity, UserStore};

/// User attribute holding the platform-issued unique ID
pub const UNIQUE_ID_ATTRIBUTE: &str = "uniqueId";

/// Resolves platform unique IDs to identities in the user store
#[derive(Debug, Clone)]
pub struct IdentityLookup {
    store: Arc<dyn UserStore>,
}

impl IdentityLookup {
    /// Create a lookup over `store`
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Find the user carrying `unique_id`
    ///
    /// `Ok(None)` means the store answered and holds no such user. A store
    /// failure is an `AuthError::InvalidArgument`, never a miss.
    pub async fn find_by_unique_id(&self, unique_id: &str) -> Result<Option<Identity>> {
        let mut found = self
            .store
            .find_by_attribute(UNIQUE_ID_ATTRIBUTE, unique_id)
            .await
            .map_err(|e| {
                warn!(error = %e, "User lookup failed");
                AuthError::InvalidArgument(format!("User lookup failed: {}", e))
            })?;

        if found.len() > 1 {
            warn!(
                matches = found.len(),
                "Several users share one unique ID, using the first"
            );
        }
        debug!(found = !found.is_empty(), "Looked up user by unique ID");

        Ok(if found.is_empty() {
            None
        } else {
            Some(found.swap_remove(0))
        })
    }
}
