//! Registration routing strategy

use crate::resolver::ActionStrategy;
use crate::types::ActionKind;

/// Strategy for registration attempts
///
/// Routes through the shared table; only the action name differs from
/// login.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistrationStrategy;

impl RegistrationStrategy {
    /// Create a new registration strategy
    pub fn new() -> Self {
        Self
    }
}

impl ActionStrategy for RegistrationStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Registration
    }

    fn description(&self) -> &str {
        "registration strategy"
    }
}
