//! Session status handler

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::handlers::AppState;
use crate::storage::Identity;

/// State of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_id: String,
    /// Whether an attempt on the session succeeded
    pub authenticated: bool,
    /// The identity bound to the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
    /// When the challenge was issued (RFC 3339)
    pub issued_at: String,
    /// Seconds since the challenge was issued
    pub age_secs: i64,
}

/// Read a session
///
/// GET /v1/auth/{session_id}
///
/// Pending sessions report `authenticated: false`. Sessions that were
/// answered without success are gone and yield 404.
pub async fn session_status(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionStatus>, ApiError> {
    let session = state
        .sessions
        .get(&session_id)
        .await
        .ok_or_else(|| ApiError::UnknownSession(session_id.clone()))?;

    Ok(Json(SessionStatus {
        session_id,
        authenticated: session.is_authenticated(),
        identity: session.identity().cloned(),
        issued_at: session.created_at().to_rfc3339(),
        age_secs: session.age().num_seconds(),
    }))
}
