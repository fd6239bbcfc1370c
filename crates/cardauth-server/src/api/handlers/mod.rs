//! API request handlers

pub mod authenticate;
pub mod challenge;
pub mod status;

pub use authenticate::{authenticate, AuthResponse, HttpFlowActions};
pub use challenge::{issue_challenge, ChallengeResponse};
pub use status::{session_status, SessionStatus};

use std::sync::Arc;

use crate::config::AuthenticatorConfig;
use crate::flow::UserActionDispatcher;
use crate::session::SessionStore;
use crate::storage::UserStore;

/// Application state shared across handlers
pub struct AppState {
    /// Runtime configuration
    pub config: AuthenticatorConfig,
    /// Pending challenges
    pub sessions: SessionStore,
    /// Runs authentication attempts
    pub dispatcher: UserActionDispatcher,
    /// User storage
    pub users: Arc<dyn UserStore>,
}
