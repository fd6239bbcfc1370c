//! Login routing strategy

use crate::resolver::ActionStrategy;
use crate::types::ActionKind;

/// Strategy for login attempts
///
/// Login has no status codes of its own; every code goes through the
/// shared table.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoginStrategy;

impl LoginStrategy {
    /// Create a new login strategy
    pub fn new() -> Self {
        Self
    }
}

impl ActionStrategy for LoginStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Login
    }

    fn description(&self) -> &str {
        "login strategy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StatusCodeRouter;
    use crate::types::RoutingDecision;

    #[test]
    fn test_login_delegates_everything() {
        let strategy = LoginStrategy::new();
        let router = StatusCodeRouter::default();

        for status in [200, 401, 404, 410, 503] {
            assert!(strategy.override_status(status).is_none());
        }
        assert_eq!(strategy.name(), "login");
        assert_eq!(
            router.route(410, strategy.name()),
            RoutingDecision::ReChallenge("replacement".into())
        );
    }
}
