//! Authentication handler
//!
//! Runs the posted answer through the dispatcher and renders the routing
//! decision as JSON. The session is taken out of the store before the
//! attempt starts, so every nonce is answered at most once. A session
//! bound to an identity goes back into the store, where it can be read
//! through the status endpoint but not answered again.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use cardauth_core::Result;

use crate::api::error::ApiError;
use crate::api::handlers::{AppState, ChallengeResponse};
use crate::flow::{FlowActions, UserRequest};
use crate::storage::Identity;

/// Body of an authentication response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AuthResponse {
    /// The user is authenticated
    Success { identity: Identity },
    /// The user has to register first
    Registration,
    /// The platform rejected the user
    Unauthorized,
    /// The user has to answer a new challenge
    #[serde(rename = "rechallenge")]
    ReChallenge {
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        challenge: Option<ChallengeResponse>,
    },
}

/// Flow actions that answer over HTTP
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFlowActions;

impl FlowActions for HttpFlowActions {
    type Output = AuthResponse;

    fn on_success(&self, identity: &Identity) -> Result<AuthResponse> {
        Ok(AuthResponse::Success {
            identity: identity.clone(),
        })
    }

    fn on_registration_challenge(&self) -> Result<AuthResponse> {
        Ok(AuthResponse::Registration)
    }

    fn on_unauthorized(&self) -> Result<AuthResponse> {
        Ok(AuthResponse::Unauthorized)
    }

    fn on_re_challenge(&self, reason: &str) -> Result<AuthResponse> {
        Ok(AuthResponse::ReChallenge {
            reason: reason.to_string(),
            challenge: None,
        })
    }
}

/// Answer a challenge
///
/// POST /v1/auth/{session_id}
///
/// Form fields: `mode`, `sign`, `certificate`, `applicantData`.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Form(request): Form<UserRequest>,
) -> std::result::Result<Response, ApiError> {
    let mut session = state.sessions.take(&session_id).await.ok_or_else(|| {
        warn!(session_id = %session_id, "Answer for unknown session");
        ApiError::UnknownSession(session_id.clone())
    })?;

    if session.is_authenticated() {
        warn!(session_id = %session_id, "Answer for an authenticated session");
        state.sessions.keep(session).await;
        return Err(ApiError::AlreadyAuthenticated(session_id));
    }

    let response = state
        .dispatcher
        .run(&mut session, &request, state.config.debug_mode, &HttpFlowActions)
        .await
        .map_err(|e| {
            warn!(session_id = %session_id, error = %e, "Authentication attempt failed");
            ApiError::from(e)
        })?;

    if session.is_authenticated() {
        info!(
            session_id = %session_id,
            age_ms = session.age().num_milliseconds(),
            "Session bound to identity"
        );
        state.sessions.keep(session).await;
    }

    let response = match response {
        AuthResponse::ReChallenge { reason, .. } => {
            let next = state.sessions.issue().await;
            info!(
                session_id = %session_id,
                next_session_id = %next.id(),
                reason = %reason,
                "Issued a new challenge"
            );
            AuthResponse::ReChallenge {
                reason,
                challenge: Some(ChallengeResponse::for_session(&next, &state.sessions)),
            }
        }
        other => other,
    };

    let status = match response {
        AuthResponse::Unauthorized => StatusCode::UNAUTHORIZED,
        _ => StatusCode::OK,
    };

    Ok((status, Json(response)).into_response())
}
