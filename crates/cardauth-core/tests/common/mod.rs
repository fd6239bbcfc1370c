//! Shared helpers for integration tests

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::Sha256;

pub const CARD_KEY_PEM: &str = include_str!("../fixtures/card_key.pem");
pub const CARD_CERT: &str = include_str!("../fixtures/card_cert.b64");
pub const OTHER_CERT: &str = include_str!("../fixtures/other_cert.b64");
pub const EC_CERT: &str = include_str!("../fixtures/ec_cert.b64");

/// Sign `plaintext` with the card key (SHA256withRSA), base64 encoded
pub fn sign(plaintext: &str) -> String {
    let key = RsaPrivateKey::from_pkcs8_pem(CARD_KEY_PEM).expect("fixture key must parse");
    STANDARD.encode(SigningKey::<Sha256>::new(key).sign(plaintext.as_bytes()).to_bytes())
}
