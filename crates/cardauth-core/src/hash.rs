//! Nonce hashing

use sha2::{Digest, Sha256};

/// Length of a SHA-256 digest rendered as hex
pub const SHA256_HEX_LEN: usize = 64;

/// Hash a string with SHA-256 and return the lowercase hex digest
///
/// The input is hashed as UTF-8 bytes. The output never depends on locale.
pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    hex::encode(digest)
}
