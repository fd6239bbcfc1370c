//! Authentication sessions
//!
//! A session is created when a client asks for a challenge. It carries the
//! nonce as an auth note and, once the attempt succeeds, the authenticated
//! identity.
//!
//! Sessions live in a moka cache with a fixed time-to-live, so abandoned
//! challenges expire without a sweeper task.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use moka::future::Cache;
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::storage::Identity;

/// Auth note holding the server-issued nonce
pub const NONCE_NOTE: &str = "nonce";

/// Number of random bytes in a nonce
pub const NONCE_BYTES: usize = 32;

/// Upper bound on concurrently pending sessions
const MAX_SESSIONS: u64 = 100_000;

/// What the dispatcher needs from the surrounding authentication session
pub trait SessionContext: Send {
    /// Read an auth note
    fn auth_note(&self, name: &str) -> Option<&str>;

    /// Attach the authenticated identity
    fn set_identity(&mut self, identity: Identity);

    /// Mark the attempt as successful
    fn signal_success(&mut self);
}

/// In-memory authentication session
#[derive(Debug, Clone)]
pub struct AuthSession {
    id: String,
    notes: HashMap<String, String>,
    identity: Option<Identity>,
    authenticated: bool,
    created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create an empty session
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            notes: HashMap::new(),
            identity: None,
            authenticated: false,
            created_at: Utc::now(),
        }
    }

    /// Create a session with a fresh ID and nonce
    pub fn with_fresh_nonce() -> Self {
        let mut session = Self::new(uuid::Uuid::new_v4().to_string());
        session.set_auth_note(NONCE_NOTE, generate_nonce());
        session
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The nonce issued with this session, if any
    pub fn nonce(&self) -> Option<&str> {
        self.auth_note(NONCE_NOTE)
    }

    /// Set an auth note, replacing any previous value
    pub fn set_auth_note(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.notes.insert(name.into(), value.into());
    }

    /// The identity bound by a successful attempt
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether an attempt on this session succeeded
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// When the challenge was issued
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time since the challenge was issued
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }
}

impl SessionContext for AuthSession {
    fn auth_note(&self, name: &str) -> Option<&str> {
        self.notes.get(name).map(String::as_str)
    }

    fn set_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    fn signal_success(&mut self) {
        self.authenticated = true;
    }
}

/// Generate a nonce: 32 random bytes, base64url without padding
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Store of pending sessions
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, AuthSession>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(MAX_SESSIONS)
                .build(),
            ttl,
        }
    }

    /// Session lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create and remember a session with a fresh nonce
    pub async fn issue(&self) -> AuthSession {
        let session = AuthSession::with_fresh_nonce();
        debug!(session_id = %session.id(), "Issued challenge");
        self.sessions
            .insert(session.id().to_string(), session.clone())
            .await;
        session
    }

    /// Remove and return a session
    ///
    /// A session can be taken once; its nonce is not accepted again.
    pub async fn take(&self, session_id: &str) -> Option<AuthSession> {
        self.sessions.remove(session_id).await
    }

    /// Put a session back, e.g. once it is bound to an identity
    ///
    /// The session stays readable until the TTL runs out again.
    pub async fn keep(&self, session: AuthSession) {
        debug!(
            session_id = %session.id(),
            authenticated = session.is_authenticated(),
            "Keeping session"
        );
        self.sessions.insert(session.id().to_string(), session).await;
    }

    /// Read a session without consuming it
    pub async fn get(&self, session_id: &str) -> Option<AuthSession> {
        self.sessions.get(session_id).await
    }

    /// Whether a session is pending
    pub async fn contains(&self, session_id: &str) -> bool {
        self.sessions.get(session_id).await.is_some()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_shape() {
        let nonce = generate_nonce();
        // 32 bytes -> 43 base64url characters without padding
        assert_eq!(nonce.len(), 43);
        assert!(nonce
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(nonce, generate_nonce());
    }

    #[test]
    fn test_session_context() {
        let mut session = AuthSession::with_fresh_nonce();
        assert!(session.nonce().is_some());
        assert!(session.auth_note("missing").is_none());
        assert!(!session.is_authenticated());

        session.set_identity(Identity::new("alice"));
        session.signal_success();

        assert_eq!(session.identity().map(|i| i.username.as_str()), Some("alice"));
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_sessions_are_taken_once() {
        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.issue().await;

        assert!(store.contains(session.id()).await);
        let taken = store.take(session.id()).await.unwrap();
        assert_eq!(taken.nonce(), session.nonce());

        assert!(store.take(session.id()).await.is_none());
        assert!(!store.contains(session.id()).await);
    }

    #[tokio::test]
    async fn test_kept_session_is_readable() {
        let store = SessionStore::new(Duration::from_secs(60));
        let mut session = store.issue().await;
        let session_id = session.id().to_string();
        store.take(&session_id).await.unwrap();

        session.set_identity(Identity::new("alice"));
        session.signal_success();
        store.keep(session).await;

        let kept = store.get(&session_id).await.unwrap();
        assert!(kept.is_authenticated());
        assert_eq!(kept.identity().map(|i| i.username.as_str()), Some("alice"));
        assert!(kept.age() >= chrono::Duration::zero());
        assert!(store.contains(&session_id).await);
    }

    #[tokio::test]
    async fn test_sessions_expire() {
        let store = SessionStore::new(Duration::from_millis(50));
        let session = store.issue().await;

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(store.take(session.id()).await.is_none());
    }
}
