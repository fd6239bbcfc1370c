//! Mock Platform Client
//!
//! For testing purposes - answers with scripted outcomes and records the
//! requests it receives.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{PlatformError, Result};
use crate::platform::PlatformClient;
use crate::types::{ActionKind, PlatformOutcome, PlatformRequest};

/// Mock platform client for testing
///
/// Answers per action kind; actions without a scripted answer get the
/// fallback answer, which defaults to a 500 outcome.
pub struct MockPlatformClient {
    answers: HashMap<ActionKind, std::result::Result<PlatformOutcome, PlatformError>>,
    fallback: std::result::Result<PlatformOutcome, PlatformError>,
    requests: Mutex<Vec<PlatformRequest>>,
}

impl MockPlatformClient {
    /// Create a mock that answers 500 to everything
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            fallback: Ok(PlatformOutcome::new(500)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that answers every request with `outcome`
    pub fn responding(outcome: PlatformOutcome) -> Self {
        Self {
            fallback: Ok(outcome),
            ..Self::new()
        }
    }

    /// Create a mock whose calls all fail with `error`
    pub fn failing(error: PlatformError) -> Self {
        Self {
            fallback: Err(error),
            ..Self::new()
        }
    }

    /// Script the outcome for one action kind
    pub fn with_outcome(mut self, action: ActionKind, outcome: PlatformOutcome) -> Self {
        self.answers.insert(action, Ok(outcome));
        self
    }

    /// Script a failure for one action kind
    pub fn with_error(mut self, action: ActionKind, error: PlatformError) -> Self {
        self.answers.insert(action, Err(error));
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<PlatformRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or(0)
    }
}

impl Default for MockPlatformClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformClient for MockPlatformClient {
    fn description(&self) -> &str {
        "mock platform client"
    }

    async fn send(&self, request: &PlatformRequest) -> Result<PlatformOutcome> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        self.answers
            .get(&request.action)
            .unwrap_or(&self.fallback)
            .clone()
    }
}
