//! Error types for the platform bridge

use cardauth_core::AuthError;
use thiserror::Error;

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Errors from the outbound platform call
///
/// These never carry a routable status code: a response that arrived,
/// whatever its status, is a `PlatformOutcome`, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform did not answer in time
    #[error("Platform timeout: {0}")]
    Timeout(String),

    /// Connection or I/O failure
    #[error("Platform transport error: {0}")]
    Transport(String),

    /// The response could not be read
    #[error("Invalid platform response: {0}")]
    InvalidResponse(String),

    /// The client is misconfigured (bad base URL, etc.)
    #[error("Platform client configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlatformError::Timeout(err.to_string())
        } else if err.is_builder() {
            PlatformError::Configuration(err.to_string())
        } else if err.is_decode() || err.is_body() {
            PlatformError::InvalidResponse(err.to_string())
        } else {
            PlatformError::Transport(err.to_string())
        }
    }
}

impl From<PlatformError> for AuthError {
    fn from(err: PlatformError) -> Self {
        AuthError::Platform(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_error_is_fatal_auth_error() {
        let err: AuthError = PlatformError::Timeout("http://platform/login".into()).into();
        assert!(matches!(err, AuthError::Platform(msg) if msg.contains("timeout")));
    }
}
