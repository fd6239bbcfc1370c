//! The authentication flow
//!
//! One attempt runs through a fixed pipeline:
//!
//! 1. The inbound form must carry every required field
//! 2. The challenge is validated locally against the session's nonce
//! 3. The assertion is forwarded to the identity platform
//! 4. The platform's status code is resolved to a routing decision
//! 5. On success the platform's unique ID is resolved to a stored user
//!
//! Terminal decisions are handed to a [`FlowActions`] implementation, which
//! decides what the caller sees.

pub mod dispatch;
pub mod request;

pub use dispatch::{FlowActions, UserActionDispatcher};
pub use request::UserRequest;
