//! Card Authenticator Server
//!
//! HTTP front end of the card challenge–response authenticator:
//! - Issues nonces bound to short-lived sessions
//! - Verifies the card's signature over the nonce
//! - Forwards verified assertions to the identity platform
//! - Routes the platform's answer to success, registration, re-challenge,
//!   or rejection
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check with configuration summary
//! - `POST /v1/auth/challenge` - Issue a challenge
//! - `POST /v1/auth/{session_id}` - Answer a challenge (form encoded)
//! - `GET /v1/auth/{session_id}` - Session status and bound identity

pub mod api;
pub mod config;
pub mod flow;
pub mod session;
pub mod storage;

pub use api::create_router;
pub use api::handlers::{AppState, AuthResponse, HttpFlowActions, SessionStatus};
pub use config::{load_identities, parse_debug_mode, AuthenticatorConfig, ConfigError};
pub use flow::{FlowActions, UserActionDispatcher, UserRequest};
pub use session::{AuthSession, SessionContext, SessionStore};
pub use storage::{Identity, IdentityLookup, MemoryUserStore, StorageError, UserStore};
