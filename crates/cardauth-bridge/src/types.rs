//! Core types for the platform bridge

use cardauth_core::{Assertion, AuthError};
use serde::{Deserialize, Serialize};

/// Reason code passed to the re-challenge action when the platform reports
/// that the card's certificate has been replaced (HTTP 410)
pub const REPLACEMENT_REASON: &str = "replacement";

/// The action a user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Authenticate an existing user
    Login,
    /// Register a new user
    Registration,
}

impl ActionKind {
    /// Action name used in logs, URLs and undefined-flow reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Login => "login",
            ActionKind::Registration => "registration",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "login" => Ok(ActionKind::Login),
            "registration" => Ok(ActionKind::Registration),
            _ => Err(AuthError::InvalidRequest(format!(
                "Action mode '{}' is undefined",
                s
            ))),
        }
    }
}

/// Routing decision for one platform response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "value", rename_all = "snake_case")]
pub enum RoutingDecision {
    /// The platform accepted the attempt; the caller continues
    Continue,
    /// The user must register first
    RegistrationChallenge,
    /// The platform rejected the user
    Unauthorized,
    /// The user must answer a new challenge, with a reason code
    ReChallenge(String),
    /// No routing exists for the status; carries the action name
    UndefinedFlow(String),
}

impl RoutingDecision {
    /// Whether the decision ends the attempt
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoutingDecision::Continue)
    }
}

/// Request sent to the identity platform
///
/// Built once by the dispatcher and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRequest {
    /// Requested action
    pub action: ActionKind,

    /// Base64 certificate of the card
    pub certificate: String,

    /// Value the client claims it signed
    pub applicant_data: String,

    /// Base64 signature
    pub sign: String,

    /// Identifier of this IdP towards the platform
    #[serde(default)]
    pub sender: String,
}

impl PlatformRequest {
    /// Build a request from a validated assertion
    pub fn new(action: ActionKind, assertion: &Assertion, sender: impl Into<String>) -> Self {
        Self {
            action,
            certificate: assertion.certificate.clone(),
            applicant_data: assertion.claimed_value.clone(),
            sign: assertion.signature.clone(),
            sender: sender.into(),
        }
    }
}

/// What the platform answered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformOutcome {
    /// HTTP status code
    pub status_code: u16,

    /// Platform-issued stable user identifier, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,

    /// Response body (opaque)
    #[serde(default)]
    pub body: serde_json::Value,
}

impl PlatformOutcome {
    /// Create an outcome with only a status code
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            unique_id: None,
            body: serde_json::Value::Null,
        }
    }

    /// Set the unique ID
    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = body;
        self
    }

    /// Return the unique ID or fail with `AuthError::MissingUniqueId`
    ///
    /// Blank IDs count as missing.
    pub fn ensure_has_unique_id(&self) -> Result<&str, AuthError> {
        match self.unique_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(AuthError::MissingUniqueId),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_parsing() {
        assert_eq!("login".parse::<ActionKind>().unwrap(), ActionKind::Login);
        assert_eq!("LOGIN".parse::<ActionKind>().unwrap(), ActionKind::Login);
        assert_eq!(
            "Registration".parse::<ActionKind>().unwrap(),
            ActionKind::Registration
        );
        assert!(matches!(
            "replacement".parse::<ActionKind>(),
            Err(AuthError::InvalidRequest(_))
        ));
        assert!("".parse::<ActionKind>().is_err());
    }

    #[test]
    fn test_action_kind_names() {
        assert_eq!(ActionKind::Login.to_string(), "login");
        assert_eq!(ActionKind::Registration.as_str(), "registration");
    }

    #[test]
    fn test_terminal_decisions() {
        assert!(!RoutingDecision::Continue.is_terminal());
        assert!(RoutingDecision::Unauthorized.is_terminal());
        assert!(RoutingDecision::ReChallenge(REPLACEMENT_REASON.into()).is_terminal());
    }

    #[test]
    fn test_platform_request_wire_names() {
        let assertion = Assertion::new("c2ln", "Y2VydA==", "abc");
        let request = PlatformRequest::new(ActionKind::Login, &assertion, "idp-1");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["action"], "login");
        assert_eq!(json["applicantData"], "abc");
        assert_eq!(json["sign"], "c2ln");
        assert_eq!(json["sender"], "idp-1");
    }

    #[test]
    fn test_unique_id_required() {
        let outcome = PlatformOutcome::new(200).with_unique_id("user-123");
        assert_eq!(outcome.ensure_has_unique_id().unwrap(), "user-123");

        assert!(matches!(
            PlatformOutcome::new(200).ensure_has_unique_id(),
            Err(AuthError::MissingUniqueId)
        ));
        assert!(matches!(
            PlatformOutcome::new(200).with_unique_id("  ").ensure_has_unique_id(),
            Err(AuthError::MissingUniqueId)
        ));
    }
}
