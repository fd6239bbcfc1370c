//! Shared helpers for integration tests

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::Sha256;
use std::io::Write;
use std::sync::{Arc, Mutex};

use cardauth_server::{FlowActions, Identity};

pub const CARD_KEY_PEM: &str = include_str!("../../../cardauth-core/tests/fixtures/card_key.pem");
pub const CARD_CERT: &str = include_str!("../../../cardauth-core/tests/fixtures/card_cert.b64");
pub const OTHER_CERT: &str = include_str!("../../../cardauth-core/tests/fixtures/other_cert.b64");

/// Sign `plaintext` with the card key (SHA256withRSA), base64 encoded
pub fn sign(plaintext: &str) -> String {
    let key = RsaPrivateKey::from_pkcs8_pem(CARD_KEY_PEM).expect("fixture key must parse");
    STANDARD.encode(SigningKey::<Sha256>::new(key).sign(plaintext.as_bytes()).to_bytes())
}

/// Which callback the dispatcher invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invoked {
    Success(String),
    RegistrationChallenge,
    Unauthorized,
    ReChallenge(String),
    UndefinedFlow(String),
}

/// Flow actions that record every invocation
#[derive(Default)]
pub struct RecordingActions {
    calls: Mutex<Vec<Invoked>>,
}

impl RecordingActions {
    pub fn calls(&self) -> Vec<Invoked> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, invoked: Invoked) -> cardauth_core::Result<Invoked> {
        self.calls.lock().unwrap().push(invoked.clone());
        Ok(invoked)
    }
}

impl FlowActions for RecordingActions {
    type Output = Invoked;

    fn on_success(&self, identity: &Identity) -> cardauth_core::Result<Invoked> {
        self.record(Invoked::Success(identity.username.clone()))
    }

    fn on_registration_challenge(&self) -> cardauth_core::Result<Invoked> {
        self.record(Invoked::RegistrationChallenge)
    }

    fn on_unauthorized(&self) -> cardauth_core::Result<Invoked> {
        self.record(Invoked::Unauthorized)
    }

    fn on_re_challenge(&self, reason: &str) -> cardauth_core::Result<Invoked> {
        self.record(Invoked::ReChallenge(reason.to_string()))
    }

    fn on_undefined_flow(&self, action_name: &str) -> cardauth_core::Result<Invoked> {
        self.record(Invoked::UndefinedFlow(action_name.to_string()))
    }
}

/// Log sink for asserting on tracing output
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }

    /// Install a subscriber recording into this buffer until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
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
