//! Platform Bridge
//!
//! The bridge connects a locally validated assertion to the remote identity
//! platform and interprets the platform's answer.
//!
//! ## Architecture
//!
//! - **Platform clients** send a `PlatformRequest` and return a
//!   `PlatformOutcome` (HTTP via reqwest, or a scripted mock for tests)
//! - **Action flow resolver** maps the outcome's status code to a
//!   `RoutingDecision` through a per-action strategy and a shared table
//!
//! ## Usage
//!
//! ```ignore
//! use cardauth_bridge::{ActionFlowResolver, ActionKind, HttpPlatformClient, HttpPlatformConfig};
//!
//! let client = HttpPlatformClient::new(
//!     HttpPlatformConfig::new("https://platform.example.com/api").with_sender("idp-1"),
//! )?;
//! let resolver = ActionFlowResolver::default();
//!
//! let outcome = client.send(&request).await?;
//! match resolver.resolve(ActionKind::Login, outcome.status_code) {
//!     RoutingDecision::Continue => { /* look up the user */ }
//!     decision => { /* invoke the matching action */ }
//! }
//! ```

pub mod error;
pub mod platform;
pub mod resolver;
pub mod strategies;
pub mod types;

pub use error::{PlatformError, Result};
pub use platform::{HttpPlatformClient, HttpPlatformConfig, MockPlatformClient, PlatformClient};
pub use resolver::{
    ActionFlowResolver, ActionFlowResolverBuilder, ActionStrategy, StatusCodeRouter,
    DEFAULT_SUCCESS_CODE,
};
pub use strategies::{LoginStrategy, RegistrationStrategy};
pub use types::{ActionKind, PlatformOutcome, PlatformRequest, RoutingDecision, REPLACEMENT_REASON};
