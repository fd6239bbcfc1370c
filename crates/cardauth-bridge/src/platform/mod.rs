//! Identity platform clients

pub mod http;
pub mod mock;

pub use http::{HttpPlatformClient, HttpPlatformConfig};
pub use mock::MockPlatformClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PlatformOutcome, PlatformRequest};

/// Trait for identity platform clients
///
/// A client is a function from request to outcome. Any HTTP status the
/// platform answers with is an `Ok(PlatformOutcome)`; errors are reserved
/// for calls that produced no status at all (timeouts, I/O failures).
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Send a request to the platform
    ///
    /// # Arguments
    /// * `request` - The request built from the validated assertion
    ///
    /// # Returns
    /// * `Ok(PlatformOutcome)` - The platform answered
    /// * `Err(PlatformError)` - The call failed before an answer arrived
    async fn send(&self, request: &PlatformRequest) -> Result<PlatformOutcome>;

    /// Get a description of this client (for logging)
    fn description(&self) -> &str {
        "platform client"
    }
}
