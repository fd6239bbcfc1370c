//! Inbound authentication form

use serde::{Deserialize, Serialize};

use cardauth_bridge::ActionKind;
use cardauth_core::{Assertion, AuthError, Result};

/// Fields posted by the client for one attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    /// `login` or `registration`
    #[serde(default)]
    pub mode: String,

    /// Base64 signature
    #[serde(default)]
    pub sign: String,

    /// Base64 X.509 certificate
    #[serde(default)]
    pub certificate: String,

    /// Value the client claims it signed
    #[serde(default, rename = "applicantData")]
    pub applicant_data: String,
}

impl UserRequest {
    pub fn new(
        mode: impl Into<String>,
        sign: impl Into<String>,
        certificate: impl Into<String>,
        applicant_data: impl Into<String>,
    ) -> Self {
        Self {
            mode: mode.into(),
            sign: sign.into(),
            certificate: certificate.into(),
            applicant_data: applicant_data.into(),
        }
    }

    /// Check that no required field is blank
    pub fn ensure_has_values(&self) -> Result<()> {
        let fields = [
            ("mode", &self.mode),
            ("sign", &self.sign),
            ("certificate", &self.certificate),
            ("applicantData", &self.applicant_data),
        ];

        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AuthError::InvalidRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// The requested action
    pub fn action(&self) -> Result<ActionKind> {
        self.mode.parse()
    }

    /// The assertion carried by this request
    pub fn assertion(&self) -> Assertion {
        Assertion::new(
            self.sign.clone(),
            self.certificate.clone(),
            self.applicant_data.clone(),
        )
    }
}
