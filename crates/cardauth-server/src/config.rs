//! Authenticator configuration
//!
//! Every value can be supplied through a `CARDAUTH_*` environment variable.
//! Unset variables fall back to the defaults below; set but unparsable
//! values are rejected, except for the debug flag, which is only ever
//! enabled by a literal `true`.
//!
//! `CARDAUTH_USERS_FILE` names a JSON array of users to seed the in-memory
//! store with:
//!
//! ```json
//! [{ "username": "alice", "attributes": { "uniqueId": "platform-user-0001" } }]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use cardauth_bridge::{HttpPlatformConfig, DEFAULT_SUCCESS_CODE};

use crate::storage::Identity;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Default platform API root
pub const DEFAULT_PLATFORM_URL: &str = "http://localhost:3000/api";

/// Default lifetime of an issued challenge
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(300);

/// Default connect timeout for platform calls
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default whole-request timeout for platform calls
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Cannot load users from {path}: {message}")]
    UsersFile { path: String, message: String },
}

/// Runtime configuration of the authenticator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorConfig {
    /// Relaxes the fail-fast verification checks (logs instead of failing)
    pub debug_mode: bool,
    /// Platform API root
    pub platform_url: String,
    /// Identifier of this IdP towards the platform
    pub idp_sender: String,
    /// Status code the platform answers a successful verification with
    pub success_code: u16,
    /// Lifetime of an issued challenge
    pub session_ttl: Duration,
    /// Connect timeout for platform calls
    pub connect_timeout: Duration,
    /// Whole-request timeout for platform calls
    pub request_timeout: Duration,
    /// Listening port
    pub port: u16,
    /// JSON file of users to seed the store with
    pub users_file: Option<PathBuf>,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            platform_url: DEFAULT_PLATFORM_URL.to_string(),
            idp_sender: String::new(),
            success_code: DEFAULT_SUCCESS_CODE,
            session_ttl: DEFAULT_SESSION_TTL,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            port: DEFAULT_PORT,
            users_file: None,
        }
    }
}

impl AuthenticatorConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            debug_mode: parse_debug_mode(lookup("CARDAUTH_DEBUG_MODE").as_deref()),
            platform_url: lookup("CARDAUTH_PLATFORM_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.platform_url),
            idp_sender: lookup("CARDAUTH_IDP_SENDER").unwrap_or(defaults.idp_sender),
            success_code: parse_or(
                &lookup,
                "CARDAUTH_SUCCESS_CODE",
                "an HTTP status code",
                defaults.success_code,
            )?,
            session_ttl: Duration::from_secs(parse_or(
                &lookup,
                "CARDAUTH_SESSION_TTL_SECS",
                "a number of seconds",
                defaults.session_ttl.as_secs(),
            )?),
            connect_timeout: Duration::from_millis(parse_or(
                &lookup,
                "CARDAUTH_CONNECT_TIMEOUT_MS",
                "a number of milliseconds",
                defaults.connect_timeout.as_millis() as u64,
            )?),
            request_timeout: Duration::from_millis(parse_or(
                &lookup,
                "CARDAUTH_REQUEST_TIMEOUT_MS",
                "a number of milliseconds",
                defaults.request_timeout.as_millis() as u64,
            )?),
            port: parse_or(&lookup, "CARDAUTH_PORT", "a port number", defaults.port)?,
            users_file: lookup("CARDAUTH_USERS_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Settings for the HTTP platform client
    pub fn platform_config(&self) -> HttpPlatformConfig {
        HttpPlatformConfig::new(self.platform_url.clone())
            .with_sender(self.idp_sender.clone())
            .with_connect_timeout(self.connect_timeout)
            .with_request_timeout(self.request_timeout)
    }
}

/// Read the users listed in a JSON file
///
/// Entries without an `id` get a generated one.
pub fn load_identities(path: &Path) -> Result<Vec<Identity>, ConfigError> {
    let users_file_error = |message: String| ConfigError::UsersFile {
        path: path.display().to_string(),
        message,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| users_file_error(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| users_file_error(e.to_string()))
}

/// Interpret the debug flag
///
/// `true` in any letter case enables debug mode. Everything else, including
/// a missing or blank value, leaves it off.
pub fn parse_debug_mode(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name,
                    expected,
                    value,
                })
        }
        _ => Ok(default),
    }
}
