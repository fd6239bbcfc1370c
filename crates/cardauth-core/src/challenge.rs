//! Challenge validation
//!
//! Decides whether an assertion proves possession of the certificate's
//! private key for the current challenge. The checks run in a fixed order
//! and stop at the first decisive result:
//!
//! 1. **Plausibility**: the applicant data must equal the nonce hash
//!    (ASCII case-insensitive). Fatal outside debug mode, logged inside it.
//! 2. **Strict gate** (outside debug mode only): the signature must verify
//!    over the lowercase or uppercase nonce hash.
//! 3. **Fallback**: the signature is tried against each
//!    [`CandidatePlaintext`] in order and the first match is reported.
//!
//! Outside debug mode only hash signatures get past the strict gate, so a
//! signature over the raw nonce or the applicant data verifies only in
//! debug mode.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::signature::SignatureVerifier;
use crate::types::{Assertion, CandidatePlaintext, Challenge, FailureReason, VerificationResult};

const DEBUG_MODE_ENABLED: &str = "Debug mode is enabled. ";

/// Validates assertions against a challenge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChallengeValidator {
    debug_mode: bool,
}

impl ChallengeValidator {
    /// Create a validator
    pub const fn new(debug_mode: bool) -> Self {
        Self { debug_mode }
    }

    /// Whether debug mode relaxes the fail-fast checks
    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Validate an assertion
    ///
    /// # Returns
    /// * `Ok(VerificationResult::Verified(candidate))` - signature matched
    /// * `Ok(VerificationResult::Failed(reason))` - verification ran, no match
    /// * `Err(AuthError::InvalidInput)` - certificate or signature malformed
    pub fn validate(
        &self,
        challenge: &Challenge,
        assertion: &Assertion,
    ) -> Result<VerificationResult> {
        debug!(
            nonce = %challenge.nonce(),
            nonce_hash = %challenge.nonce_hash(),
            applicant_data = %assertion.claimed_value,
            debug_mode = self.debug_mode,
            "Validating challenge"
        );

        if !claimed_value_matches(challenge, &assertion.claimed_value) {
            if !self.debug_mode {
                warn!(
                    applicant_data = %assertion.claimed_value,
                    "Applicant data is not equal to the nonce hash"
                );
                return Ok(VerificationResult::Failed(FailureReason::ClaimedValueMismatch));
            }
            warn!(
                applicant_data = %assertion.claimed_value,
                "{}Applicant data is not equal to the nonce hash",
                DEBUG_MODE_ENABLED
            );
        }

        // Malformed input fails here regardless of debug mode
        let verifier = SignatureVerifier::from_base64(&assertion.signature, &assertion.certificate)?;

        if !strict_check(&verifier, challenge) {
            if !self.debug_mode {
                warn!("Signature is not over the nonce hash");
                return Ok(VerificationResult::Failed(FailureReason::SignatureMismatch));
            }
            info!(
                "{}Strict signature check bypassed: the signature is not over the nonce hash",
                DEBUG_MODE_ENABLED
            );
        }

        Ok(fallback_check(&verifier, challenge, assertion, self.debug_mode))
    }
}

/// Validate an assertion with the given debug mode
pub fn validate(
    challenge: &Challenge,
    assertion: &Assertion,
    debug_mode: bool,
) -> Result<VerificationResult> {
    ChallengeValidator::new(debug_mode).validate(challenge, assertion)
}

fn claimed_value_matches(challenge: &Challenge, claimed_value: &str) -> bool {
    claimed_value.eq_ignore_ascii_case(challenge.nonce_hash())
}

fn strict_check(verifier: &SignatureVerifier, challenge: &Challenge) -> bool {
    verifier.verifies(challenge.nonce_hash()) || verifier.verifies(&challenge.nonce_hash_upper())
}

fn fallback_check(
    verifier: &SignatureVerifier,
    challenge: &Challenge,
    assertion: &Assertion,
    debug_mode: bool,
) -> VerificationResult {
    for candidate in CandidatePlaintext::ORDER {
        let plaintext = candidate.render(challenge, assertion);
        if verifier.verifies(&plaintext) {
            debug!(candidate = %candidate, "Signature verified");
            return VerificationResult::Verified(candidate);
        }

        match candidate {
            CandidatePlaintext::NonceHashUpper => info!(
                debug_mode,
                "Signed value was not the nonce hash, retrying with the nonce"
            ),
            CandidatePlaintext::NonceRaw => info!(
                debug_mode,
                "Signed value was not the nonce, retrying with the applicant data"
            ),
            _ => {}
        }
    }

    warn!(debug_mode, "Signature does not match the applicant data");
    VerificationResult::Failed(FailureReason::NoCandidateMatched)
}
