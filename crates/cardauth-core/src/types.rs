//! Core data model for one authentication attempt

use serde::{Deserialize, Serialize};

use crate::hash::sha256_hex;

/// Server-issued challenge for one authentication attempt
///
/// `nonce_hash` is always the lowercase SHA-256 hex digest of `nonce`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    nonce: String,
    nonce_hash: String,
}

impl Challenge {
    /// Create a challenge from the nonce stored in the session
    pub fn new(nonce: impl Into<String>) -> Self {
        let nonce = nonce.into();
        let nonce_hash = sha256_hex(&nonce);
        Self { nonce, nonce_hash }
    }

    /// The raw nonce
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Lowercase hex SHA-256 of the nonce
    pub fn nonce_hash(&self) -> &str {
        &self.nonce_hash
    }

    /// Uppercase rendering of the nonce hash (ASCII folding only)
    pub fn nonce_hash_upper(&self) -> String {
        self.nonce_hash.to_ascii_uppercase()
    }
}

/// What the client submitted: a signature, the certificate of the signing
/// key and the value the client claims it signed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    /// Base64 signature bytes
    pub signature: String,

    /// Base64 X.509 certificate (DER)
    pub certificate: String,

    /// Self-declared signed value ("applicant data")
    pub claimed_value: String,
}

impl Assertion {
    /// Create a new assertion
    pub fn new(
        signature: impl Into<String>,
        certificate: impl Into<String>,
        claimed_value: impl Into<String>,
    ) -> Self {
        Self {
            signature: signature.into(),
            certificate: certificate.into(),
            claimed_value: claimed_value.into(),
        }
    }
}

/// A plaintext the signature may have been computed over
///
/// Variants are listed in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePlaintext {
    /// Lowercase hex nonce hash
    NonceHashLower,
    /// Uppercase hex nonce hash
    NonceHashUpper,
    /// The nonce itself
    NonceRaw,
    /// The client's claimed value
    ClaimedValue,
}

impl CandidatePlaintext {
    /// Fallback verification order
    pub const ORDER: [CandidatePlaintext; 4] = [
        CandidatePlaintext::NonceHashLower,
        CandidatePlaintext::NonceHashUpper,
        CandidatePlaintext::NonceRaw,
        CandidatePlaintext::ClaimedValue,
    ];

    /// Render the plaintext for a challenge and assertion
    pub fn render(&self, challenge: &Challenge, assertion: &Assertion) -> String {
        match self {
            CandidatePlaintext::NonceHashLower => challenge.nonce_hash().to_string(),
            CandidatePlaintext::NonceHashUpper => challenge.nonce_hash_upper(),
            CandidatePlaintext::NonceRaw => challenge.nonce().to_string(),
            CandidatePlaintext::ClaimedValue => assertion.claimed_value.clone(),
        }
    }
}

impl std::fmt::Display for CandidatePlaintext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidatePlaintext::NonceHashLower => write!(f, "nonce_hash_lower"),
            CandidatePlaintext::NonceHashUpper => write!(f, "nonce_hash_upper"),
            CandidatePlaintext::NonceRaw => write!(f, "nonce_raw"),
            CandidatePlaintext::ClaimedValue => write!(f, "claimed_value"),
        }
    }
}

/// Why verification did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Claimed value is not the nonce hash
    ClaimedValueMismatch,
    /// Signature matches neither rendering of the nonce hash
    SignatureMismatch,
    /// Signature matches none of the fallback candidates
    NoCandidateMatched,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::ClaimedValueMismatch => {
                write!(f, "applicant data does not match the nonce hash")
            }
            FailureReason::SignatureMismatch => {
                write!(f, "signature does not match the nonce hash")
            }
            FailureReason::NoCandidateMatched => {
                write!(f, "signature does not match any candidate plaintext")
            }
        }
    }
}

/// Outcome of challenge validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    /// Signature verified over the given candidate
    Verified(CandidatePlaintext),
    /// Verification ran and did not match
    Failed(FailureReason),
}

impl VerificationResult {
    /// Whether the signature was verified
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationResult::Verified(_))
    }

    /// Convert into a `Result`, mapping `Failed` onto `AuthError::Failed`
    pub fn into_result(self) -> crate::Result<CandidatePlaintext> {
        match self {
            VerificationResult::Verified(candidate) => Ok(candidate),
            VerificationResult::Failed(reason) => Err(crate::AuthError::Failed(reason)),
        }
    }
}
