//! Error types for the card authenticator core

use thiserror::Error;

use crate::types::FailureReason;

/// Result type alias using AuthError
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can abort an authentication attempt
///
/// Every variant is local to one attempt. Nothing here is retried by the
/// core; debug mode relaxes individual checks but never changes which
/// variant a failure is reported as.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Required inbound fields are missing or blank
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Certificate or signature could not be decoded or used
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Verification ran but the signature did not match
    #[error("Verification failed: {0}")]
    Failed(FailureReason),

    /// The platform accepted the attempt but returned no unique ID
    #[error("Platform response is missing the unique ID")]
    MissingUniqueId,

    /// The user store lookup failed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The platform returned a status code with no routing for this action
    #[error("Undefined flow for action '{0}'")]
    UndefinedFlow(String),

    /// The outbound platform call failed before producing a status code
    #[error("Platform call failed: {0}")]
    Platform(String),
}

impl AuthError {
    /// Whether the error is caused by the client (as opposed to integration
    /// or configuration problems on the server side)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidRequest(_) | AuthError::InvalidInput(_) | AuthError::Failed(_)
        )
    }
}

impl From<base64::DecodeError> for AuthError {
    fn from(err: base64::DecodeError) -> Self {
        AuthError::InvalidInput(format!("Invalid base64 encoding: {}", err))
    }
}

impl From<rsa::pkcs8::spki::Error> for AuthError {
    fn from(err: rsa::pkcs8::spki::Error) -> Self {
        AuthError::InvalidInput(format!("Unsupported public key: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(AuthError::InvalidRequest("sign".into()).is_client_error());
        assert!(AuthError::InvalidInput("bad cert".into()).is_client_error());
        assert!(AuthError::Failed(FailureReason::SignatureMismatch).is_client_error());

        assert!(!AuthError::MissingUniqueId.is_client_error());
        assert!(!AuthError::UndefinedFlow("login".into()).is_client_error());
        assert!(!AuthError::Platform("timeout".into()).is_client_error());
    }

    #[test]
    fn test_failed_display_includes_reason() {
        let err = AuthError::Failed(FailureReason::ClaimedValueMismatch);
        assert_eq!(
            err.to_string(),
            "Verification failed: applicant data does not match the nonce hash"
        );
    }
}
