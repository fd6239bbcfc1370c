//! HTTP Platform Client
//!
//! Sends the assertion to the identity platform as JSON and turns whatever
//! comes back into a `PlatformOutcome`.
//!
//! Requests go to `POST {base_url}/{action}` with an `X-Idp-Sender` header.
//! The response body is kept as JSON when it parses (raw text otherwise),
//! and the unique ID is read from its `uniqueId` or `unique_id` field.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{PlatformError, Result};
use crate::platform::PlatformClient;
use crate::types::{PlatformOutcome, PlatformRequest};

/// Header carrying this IdP's identifier towards the platform
pub const SENDER_HEADER: &str = "X-Idp-Sender";

/// Configuration for the HTTP platform client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpPlatformConfig {
    /// Platform API root (scheme, host, port and optional path prefix)
    pub base_url: String,

    /// Identifier of this IdP sent with every request
    #[serde(default)]
    pub sender: String,

    /// Connection timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<Duration>,

    /// Whole-request timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,
}

impl HttpPlatformConfig {
    /// Create a new configuration with no timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            sender: String::new(),
            connect_timeout: None,
            request_timeout: None,
        }
    }

    /// Set the sender identifier
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Identity platform client over HTTP
pub struct HttpPlatformClient {
    base_url: Url,
    sender: String,
    http_client: reqwest::Client,
}

impl HttpPlatformClient {
    /// Create a new client
    ///
    /// # Errors
    /// `PlatformError::Configuration` if the base URL does not parse or the
    /// HTTP client cannot be built.
    pub fn new(config: HttpPlatformConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            PlatformError::Configuration(format!("Invalid platform URL '{}': {}", config.base_url, e))
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| PlatformError::Configuration(e.to_string()))?;

        Ok(Self {
            base_url,
            sender: config.sender,
            http_client,
        })
    }

    /// The URL a request for `action` is sent to
    pub fn action_url(&self, action: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), action)
    }
}

#[async_trait]
impl PlatformClient for HttpPlatformClient {
    fn description(&self) -> &str {
        "HTTP platform client"
    }

    async fn send(&self, request: &PlatformRequest) -> Result<PlatformOutcome> {
        let url = self.action_url(request.action.as_str());
        debug!(url = %url, action = %request.action, "Sending request to platform");

        let response = self
            .http_client
            .post(&url)
            .header(SENDER_HEADER, &self.sender)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Platform request failed");
                match PlatformError::from(e) {
                    PlatformError::Timeout(_) => {
                        PlatformError::Timeout(format!("Connect timeout. Platform URL: {}", url))
                    }
                    other => other,
                }
            })?;

        let status_code = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = parse_body(&bytes);
        let unique_id = extract_unique_id(&body);

        debug!(
            status = status_code,
            has_unique_id = unique_id.is_some(),
            "Platform answered"
        );

        Ok(PlatformOutcome {
            status_code,
            unique_id,
            body,
        })
    }
}

/// Parse a response body as JSON, falling back to a string
fn parse_body(bytes: &[u8]) -> serde_json::Value {
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()))
}

/// Read the unique ID from a response body
fn extract_unique_id(body: &serde_json::Value) -> Option<String> {
    ["uniqueId", "unique_id"]
        .iter()
        .find_map(|field| body.get(field).and_then(|v| v.as_str()))
        .map(String::from)
}
