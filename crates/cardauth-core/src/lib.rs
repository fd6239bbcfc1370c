//! # Card Auth Core
//!
//! Verification primitives for card-based challenge–response authentication.
//!
//! A client answers a server-issued nonce with a signature made by the key
//! of its certificate, plus the value it claims to have signed (the
//! "applicant data"). This crate decides whether that answer is valid.
//!
//! ## Key Concepts
//!
//! - **Challenge**: the nonce of one attempt and its SHA-256 hex digest
//! - **Assertion**: signature, certificate and applicant data from the client
//! - **Candidate plaintext**: one of the values the signature may cover,
//!   tried in a fixed order
//! - **Debug mode**: relaxes the fail-fast checks, never the final
//!   verification

pub mod challenge;
pub mod error;
pub mod hash;
pub mod signature;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use challenge::{validate, ChallengeValidator};
pub use error::{AuthError, Result};
pub use hash::{sha256_hex, SHA256_HEX_LEN};
pub use signature::{public_key_from_certificate, verify_signature, SignatureVerifier};
pub use types::{Assertion, CandidatePlaintext, Challenge, FailureReason, VerificationResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
