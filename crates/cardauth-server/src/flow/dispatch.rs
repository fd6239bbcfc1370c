//! User action dispatcher - runs one authentication attempt end to end

use std::sync::Arc;
use tracing::{debug, info, warn};

use cardauth_bridge::{
    ActionFlowResolver, PlatformClient, PlatformRequest, RoutingDecision,
};
use cardauth_core::{AuthError, Challenge, ChallengeValidator, Result};

use crate::flow::request::UserRequest;
use crate::session::{SessionContext, NONCE_NOTE};
use crate::storage::{Identity, IdentityLookup};

/// Callbacks for the ways an attempt can end
///
/// Each callback produces the caller-facing result. `on_undefined_flow`
/// fails the attempt unless an implementation chooses otherwise.
pub trait FlowActions {
    /// What the callbacks produce
    type Output;

    /// The user was verified and found
    fn on_success(&self, identity: &Identity) -> Result<Self::Output>;

    /// The user has to register first
    fn on_registration_challenge(&self) -> Result<Self::Output>;

    /// The platform rejected the user
    fn on_unauthorized(&self) -> Result<Self::Output>;

    /// The user has to answer a new challenge
    fn on_re_challenge(&self, reason: &str) -> Result<Self::Output>;

    /// The platform answered with a status no flow is defined for
    fn on_undefined_flow(&self, action_name: &str) -> Result<Self::Output> {
        Err(AuthError::UndefinedFlow(action_name.to_string()))
    }
}

/// Runs authentication attempts
///
/// Holds only read-only handles, so one dispatcher serves every request.
#[derive(Clone)]
pub struct UserActionDispatcher {
    platform: Arc<dyn PlatformClient>,
    resolver: Arc<ActionFlowResolver>,
    lookup: IdentityLookup,
    sender: String,
}

impl UserActionDispatcher {
    /// Create a new dispatcher
    pub fn new(
        platform: Arc<dyn PlatformClient>,
        resolver: Arc<ActionFlowResolver>,
        lookup: IdentityLookup,
    ) -> Self {
        Self {
            platform,
            resolver,
            lookup,
            sender: String::new(),
        }
    }

    /// Set the IdP identifier sent with platform requests
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    /// Run one attempt
    ///
    /// # Errors
    /// - `InvalidRequest` for blank fields, an unknown mode or a session
    ///   without a nonce
    /// - `InvalidInput` / `Failed` from local verification
    /// - `Platform` when the platform call produced no status
    /// - `MissingUniqueId` / `InvalidArgument` while resolving the user
    /// - whatever the invoked callback returns
    pub async fn run<S, A>(
        &self,
        session: &mut S,
        request: &UserRequest,
        debug_mode: bool,
        actions: &A,
    ) -> Result<A::Output>
    where
        S: SessionContext + ?Sized,
        A: FlowActions + ?Sized,
    {
        request.ensure_has_values()?;
        let action = request.action()?;

        let nonce = session
            .auth_note(NONCE_NOTE)
            .filter(|nonce| !nonce.is_empty())
            .ok_or_else(|| AuthError::InvalidRequest("Session has no nonce".into()))?;
        let challenge = Challenge::new(nonce);
        let assertion = request.assertion();

        let candidate = ChallengeValidator::new(debug_mode)
            .validate(&challenge, &assertion)?
            .into_result()?;
        debug!(action = %action, candidate = %candidate, "Challenge verified");

        let platform_request = PlatformRequest::new(action, &assertion, self.sender.clone());
        let outcome = self.platform.send(&platform_request).await.map_err(|e| {
            warn!(action = %action, error = %e, "Platform call failed");
            AuthError::from(e)
        })?;

        match self.resolver.resolve(action, outcome.status_code) {
            RoutingDecision::Continue => {}
            RoutingDecision::RegistrationChallenge => return actions.on_registration_challenge(),
            RoutingDecision::Unauthorized => return actions.on_unauthorized(),
            RoutingDecision::ReChallenge(reason) => return actions.on_re_challenge(&reason),
            RoutingDecision::UndefinedFlow(action_name) => {
                return actions.on_undefined_flow(&action_name)
            }
        }

        let unique_id = outcome.ensure_has_unique_id()?;
        match self.lookup.find_by_unique_id(unique_id).await? {
            None => {
                info!(action = %action, "Verified card has no user yet");
                actions.on_registration_challenge()
            }
            Some(identity) => {
                info!(action = %action, user = %identity.username, "User authenticated");
                session.set_identity(identity.clone());
                session.signal_success();
                actions.on_success(&identity)
            }
        }
    }
}
