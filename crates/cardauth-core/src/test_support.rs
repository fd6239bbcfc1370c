//! Fixtures and helpers shared by unit tests

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::Sha256;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// PKCS#8 private key matching `CARD_CERT`
pub const CARD_KEY_PEM: &str = include_str!("../tests/fixtures/card_key.pem");

/// Self-signed RSA certificate (base64 DER)
pub const CARD_CERT: &str = include_str!("../tests/fixtures/card_cert.b64");

/// RSA certificate for an unrelated key
pub const OTHER_CERT: &str = include_str!("../tests/fixtures/other_cert.b64");

/// P-256 certificate
pub const EC_CERT: &str = include_str!("../tests/fixtures/ec_cert.b64");

/// Sign `plaintext` with the card key and return the base64 signature
pub fn sign(plaintext: &str) -> String {
    let key = RsaPrivateKey::from_pkcs8_pem(CARD_KEY_PEM).expect("fixture key must parse");
    let signing_key = SigningKey::<Sha256>::new(key);
    STANDARD.encode(signing_key.sign(plaintext.as_bytes()).to_bytes())
}

/// Log sink for asserting on tracing output
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }

    /// Run `f` with a subscriber that records into this buffer
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
