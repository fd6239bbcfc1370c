//! RSA signature verification against an X.509 certificate
//!
//! Signatures are RSASSA-PKCS1-v1_5 with SHA-256 ("SHA256withRSA") computed
//! over the UTF-8 bytes of a plaintext. The certificate carries the public
//! key; it is parsed with x509_parser and its SubjectPublicKeyInfo is handed
//! to the rsa crate.
//!
//! # Security
//!
//! - Certificate input is limited to 16KB
//! - Malformed input is an error (`AuthError::InvalidInput`), never a
//!   plain mismatch, so callers can tell client faults from wrong keys

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use sha2::Sha256;
use x509_parser::prelude::*;

use crate::error::{AuthError, Result};

/// Maximum certificate size (16KB is generous for a single cert)
pub const MAX_CERT_SIZE: usize = 16 * 1024;

/// A decoded signature bound to the public key of a certificate
///
/// Decoding happens once; `verifies` can then be called for each candidate
/// plaintext.
pub struct SignatureVerifier {
    key: VerifyingKey<Sha256>,
    signature: Signature,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("key", &"[rsa public key]")
            .finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    /// Decode a base64 signature and a base64 DER certificate
    ///
    /// # Errors
    /// `AuthError::InvalidInput` if either value is not valid base64, the
    /// certificate is not a parseable X.509 certificate, or its key is not
    /// an RSA key.
    pub fn from_base64(signature_b64: &str, certificate_b64: &str) -> Result<Self> {
        let certificate_der = STANDARD.decode(certificate_b64).map_err(|e| {
            AuthError::InvalidInput(format!("Invalid certificate encoding: {}", e))
        })?;
        let public_key = public_key_from_certificate(&certificate_der)?;

        let signature_bytes = STANDARD.decode(signature_b64).map_err(|e| {
            AuthError::InvalidInput(format!("Invalid signature encoding: {}", e))
        })?;

        Self::new(public_key, &signature_bytes)
    }

    /// Build a verifier from an RSA public key and raw signature bytes
    pub fn new(public_key: RsaPublicKey, signature: &[u8]) -> Result<Self> {
        if signature.is_empty() {
            return Err(AuthError::InvalidInput("Signature is empty".into()));
        }
        if signature.len() != public_key.size() {
            return Err(AuthError::InvalidInput(format!(
                "Bad signature length: {} bytes for a {}-byte modulus",
                signature.len(),
                public_key.size()
            )));
        }

        let signature = Signature::try_from(signature)
            .map_err(|e| AuthError::InvalidInput(format!("Malformed signature: {}", e)))?;

        Ok(Self {
            key: VerifyingKey::<Sha256>::new(public_key),
            signature,
        })
    }

    /// Check whether the signature was computed over `plaintext`
    pub fn verifies(&self, plaintext: &str) -> bool {
        self.key.verify(plaintext.as_bytes(), &self.signature).is_ok()
    }
}

/// Extract the RSA public key from a DER-encoded X.509 certificate
///
/// # Errors
/// `AuthError::InvalidInput` if the certificate is too large, malformed, or
/// does not carry an RSA key.
pub fn public_key_from_certificate(certificate_der: &[u8]) -> Result<RsaPublicKey> {
    if certificate_der.len() > MAX_CERT_SIZE {
        return Err(AuthError::InvalidInput(format!(
            "Certificate too large: {} bytes (max {})",
            certificate_der.len(),
            MAX_CERT_SIZE
        )));
    }

    let (_, certificate) = X509Certificate::from_der(certificate_der).map_err(|e| {
        AuthError::InvalidInput(format!("Malformed X.509 certificate: {:?}", e))
    })?;

    let public_key = RsaPublicKey::from_public_key_der(certificate.public_key().raw)?;
    Ok(public_key)
}

/// Verify a base64 signature over `plaintext` with the key of a base64
/// DER certificate
///
/// Returns `Ok(false)` for a well-formed signature that does not match.
pub fn verify_signature(
    signature_b64: &str,
    certificate_b64: &str,
    plaintext: &str,
) -> Result<bool> {
    let verifier = SignatureVerifier::from_base64(signature_b64, certificate_b64)?;
    Ok(verifier.verifies(plaintext))
}
