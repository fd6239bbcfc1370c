//! Action flow resolver - routes platform status codes to decisions

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::strategies::{LoginStrategy, RegistrationStrategy};
use crate::types::{ActionKind, RoutingDecision, REPLACEMENT_REASON};

/// Status code the platform uses for a successful verification by default
pub const DEFAULT_SUCCESS_CODE: u16 = 200;

/// HTTP 401
pub const STATUS_UNAUTHORIZED: u16 = 401;
/// HTTP 404
pub const STATUS_NOT_FOUND: u16 = 404;
/// HTTP 410
pub const STATUS_GONE: u16 = 410;

/// Trait for per-action routing strategies
///
/// A strategy may claim status codes before the shared table is consulted.
pub trait ActionStrategy: Send + Sync {
    /// The action kind this strategy handles
    fn kind(&self) -> ActionKind;

    /// Action name reported in undefined flows
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Decide a status code ahead of the shared table
    ///
    /// Returning `None` delegates to the shared table.
    fn override_status(&self, _status: u16) -> Option<RoutingDecision> {
        None
    }

    /// Get a description of this strategy (for logging)
    fn description(&self) -> &str {
        "action strategy"
    }
}

/// The shared status code table
///
/// Codes are checked in fixed priority order and the first match wins:
///
/// | Status | Decision |
/// |---|---|
/// | success code | `Continue` |
/// | 404 | `RegistrationChallenge` |
/// | 401 | `Unauthorized` |
/// | 410 | `ReChallenge("replacement")` |
/// | anything else | `UndefinedFlow(action)` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCodeRouter {
    success_code: u16,
}

impl StatusCodeRouter {
    /// Create a router with a custom success code
    pub const fn new(success_code: u16) -> Self {
        Self { success_code }
    }

    /// The configured success code
    pub fn success_code(&self) -> u16 {
        self.success_code
    }

    /// Route a status code for the named action
    pub fn route(&self, status: u16, action_name: &str) -> RoutingDecision {
        if status == self.success_code {
            return RoutingDecision::Continue;
        }

        match status {
            STATUS_NOT_FOUND => RoutingDecision::RegistrationChallenge,
            STATUS_UNAUTHORIZED => RoutingDecision::Unauthorized,
            STATUS_GONE => RoutingDecision::ReChallenge(REPLACEMENT_REASON.to_string()),
            _ => RoutingDecision::UndefinedFlow(action_name.to_string()),
        }
    }
}

impl Default for StatusCodeRouter {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_CODE)
    }
}

/// Action Flow Resolver - routes status codes through per-action strategies
///
/// The resolver holds one strategy per action kind. A strategy's overrides
/// are consulted first; otherwise the shared [`StatusCodeRouter`] decides.
pub struct ActionFlowResolver {
    router: StatusCodeRouter,
    strategies: HashMap<ActionKind, Arc<dyn ActionStrategy>>,
}

impl ActionFlowResolver {
    /// Create a resolver with no strategies
    pub fn new(router: StatusCodeRouter) -> Self {
        Self {
            router,
            strategies: HashMap::new(),
        }
    }

    /// Create a resolver with the login and registration strategies
    pub fn with_defaults(success_code: u16) -> Self {
        ActionFlowResolverBuilder::new(success_code)
            .with_strategy(LoginStrategy::new())
            .with_strategy(RegistrationStrategy::new())
            .build()
    }

    /// Register a strategy, replacing any previous one for the same kind
    pub fn register_strategy<S: ActionStrategy + 'static>(&mut self, strategy: S) {
        let kind = strategy.kind();
        info!(
            action = %kind,
            description = strategy.description(),
            "Registered action strategy"
        );
        self.strategies.insert(kind, Arc::new(strategy));
    }

    /// Check if a strategy is registered for an action kind
    pub fn has_strategy(&self, kind: ActionKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /// The shared router
    pub fn router(&self) -> &StatusCodeRouter {
        &self.router
    }

    /// Resolve a platform status code for an action
    ///
    /// Total: every status code yields exactly one decision. An action with
    /// no registered strategy resolves to `UndefinedFlow`.
    pub fn resolve(&self, kind: ActionKind, status: u16) -> RoutingDecision {
        let decision = match self.strategies.get(&kind) {
            Some(strategy) => strategy
                .override_status(status)
                .unwrap_or_else(|| self.router.route(status, strategy.name())),
            None => {
                warn!(action = %kind, "No strategy for action");
                RoutingDecision::UndefinedFlow(kind.as_str().to_string())
            }
        };

        match &decision {
            RoutingDecision::UndefinedFlow(action) => {
                error!(
                    action = %action,
                    status = status,
                    "Platform returned a status with no defined flow"
                );
            }
            _ => {
                info!(
                    action = %kind,
                    status = status,
                    decision = ?decision,
                    "Resolved platform status"
                );
            }
        }

        decision
    }
}

impl Default for ActionFlowResolver {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_SUCCESS_CODE)
    }
}

/// Builder for creating an ActionFlowResolver with strategies
pub struct ActionFlowResolverBuilder {
    resolver: ActionFlowResolver,
}

impl ActionFlowResolverBuilder {
    /// Create a new builder
    pub fn new(success_code: u16) -> Self {
        Self {
            resolver: ActionFlowResolver::new(StatusCodeRouter::new(success_code)),
        }
    }

    /// Add a strategy
    pub fn with_strategy<S: ActionStrategy + 'static>(mut self, strategy: S) -> Self {
        self.resolver.register_strategy(strategy);
        self
    }

    /// Build the resolver
    pub fn build(self) -> ActionFlowResolver {
        self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TeapotStrategy;

    impl ActionStrategy for TeapotStrategy {
        fn kind(&self) -> ActionKind {
            ActionKind::Login
        }

        fn override_status(&self, status: u16) -> Option<RoutingDecision> {
            (status == 418).then(|| RoutingDecision::ReChallenge("teapot".into()))
        }
    }

    #[test]
    fn test_shared_table() {
        let router = StatusCodeRouter::default();

        assert_eq!(router.route(200, "login"), RoutingDecision::Continue);
        assert_eq!(router.route(404, "login"), RoutingDecision::RegistrationChallenge);
        assert_eq!(router.route(401, "login"), RoutingDecision::Unauthorized);
        assert_eq!(
            router.route(410, "login"),
            RoutingDecision::ReChallenge("replacement".into())
        );
        assert_eq!(
            router.route(503, "login"),
            RoutingDecision::UndefinedFlow("login".into())
        );
    }

    #[test]
    fn test_custom_success_code() {
        let router = StatusCodeRouter::new(201);

        assert_eq!(router.route(201, "login"), RoutingDecision::Continue);
        assert_eq!(
            router.route(200, "login"),
            RoutingDecision::UndefinedFlow("login".into())
        );
    }

    #[test]
    fn test_success_code_checked_first() {
        let router = StatusCodeRouter::new(404);
        assert_eq!(router.route(404, "login"), RoutingDecision::Continue);
    }

    #[test]
    fn test_resolver_uses_action_name() {
        let resolver = ActionFlowResolver::default();

        assert_eq!(
            resolver.resolve(ActionKind::Login, 503),
            RoutingDecision::UndefinedFlow("login".into())
        );
        assert_eq!(
            resolver.resolve(ActionKind::Registration, 500),
            RoutingDecision::UndefinedFlow("registration".into())
        );
    }

    #[test]
    fn test_override_checked_before_shared_table() {
        let resolver = ActionFlowResolverBuilder::new(DEFAULT_SUCCESS_CODE)
            .with_strategy(TeapotStrategy)
            .build();

        assert_eq!(
            resolver.resolve(ActionKind::Login, 418),
            RoutingDecision::ReChallenge("teapot".into())
        );
        assert_eq!(resolver.resolve(ActionKind::Login, 200), RoutingDecision::Continue);
    }

    #[test]
    fn test_missing_strategy_is_undefined_flow() {
        let resolver = ActionFlowResolver::new(StatusCodeRouter::default());

        assert!(!resolver.has_strategy(ActionKind::Login));
        assert_eq!(
            resolver.resolve(ActionKind::Login, 200),
            RoutingDecision::UndefinedFlow("login".into())
        );
    }

    #[test]
    fn test_defaults_register_both_kinds() {
        let resolver = ActionFlowResolver::default();
        assert!(resolver.has_strategy(ActionKind::Login));
        assert!(resolver.has_strategy(ActionKind::Registration));
        assert_eq!(resolver.router().success_code(), 200);
    }
}
