//! API error types and responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use cardauth_core::{AuthError, FailureReason};

/// API error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Verification failed: {0}")]
    VerificationFailed(FailureReason),

    #[error("Unknown or expired session: {0}")]
    UnknownSession(String),

    #[error("Session is already authenticated: {0}")]
    AlreadyAuthenticated(String),

    #[error("Platform response is missing the unique ID")]
    MissingUniqueId,

    #[error("User store error: {0}")]
    UserStore(String),

    #[error("Undefined flow for action '{0}'")]
    UndefinedFlow(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// HTTP status and machine-readable code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ApiError::VerificationFailed(_) => (StatusCode::BAD_REQUEST, "VERIFICATION_FAILED"),
            ApiError::UnknownSession(_) => (StatusCode::NOT_FOUND, "UNKNOWN_SESSION"),
            ApiError::AlreadyAuthenticated(_) => (StatusCode::CONFLICT, "ALREADY_AUTHENTICATED"),
            ApiError::MissingUniqueId => (StatusCode::INTERNAL_SERVER_ERROR, "MISSING_UNIQUE_ID"),
            ApiError::UserStore(_) => (StatusCode::INTERNAL_SERVER_ERROR, "USER_STORE_ERROR"),
            ApiError::UndefinedFlow(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UNDEFINED_FLOW"),
            ApiError::Platform(_) => (StatusCode::BAD_GATEWAY, "PLATFORM_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let details = match &self {
            ApiError::VerificationFailed(reason) => {
                Some(serde_json::json!({ "reason": reason }))
            }
            ApiError::UndefinedFlow(action) => Some(serde_json::json!({ "action": action })),
            _ => None,
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidRequest(msg) => ApiError::InvalidRequest(msg),
            AuthError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            AuthError::Failed(reason) => ApiError::VerificationFailed(reason),
            AuthError::MissingUniqueId => ApiError::MissingUniqueId,
            AuthError::InvalidArgument(msg) => ApiError::UserStore(msg),
            AuthError::UndefinedFlow(action) => ApiError::UndefinedFlow(action),
            AuthError::Platform(msg) => ApiError::Platform(msg),
        }
    }
}
