//! Challenge issuance handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::handlers::AppState;
use crate::session::{AuthSession, SessionStore};

/// A freshly issued challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// Session to post the answer to
    pub session_id: String,
    /// Value the card has to sign (after hashing)
    pub nonce: String,
    /// Seconds until the challenge expires
    pub expires_in: u64,
}

impl ChallengeResponse {
    pub(crate) fn for_session(session: &AuthSession, store: &SessionStore) -> Self {
        Self {
            session_id: session.id().to_string(),
            nonce: session.nonce().unwrap_or_default().to_string(),
            expires_in: store.ttl().as_secs(),
        }
    }
}

/// Issue a challenge
///
/// POST /v1/auth/challenge
///
/// The client signs the SHA-256 hex digest of the returned nonce and posts
/// the answer to `/v1/auth/{session_id}` before the challenge expires.
pub async fn issue_challenge(State(state): State<Arc<AppState>>) -> Json<ChallengeResponse> {
    let session = state.sessions.issue().await;
    Json(ChallengeResponse::for_session(&session, &state.sessions))
}
