use serde::{Deserialize, Serialize};

use crate::errors::{LoanError, Result};

/// processor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// send a notification once the application is priced and saved
    pub notify_applicant: bool,
    /// call the external service once the application is priced and saved
    pub call_external_service: bool,
    /// fail the call when the notification cannot be delivered
    pub require_notification: bool,
    /// fail the call when the external service call fails
    pub require_external_service: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProcessorConfig {
    /// notify the applicant, skip the external service, tolerate delivery failures
    pub fn standard() -> Self {
        Self {
            notify_applicant: true,
            call_external_service: false,
            require_notification: false,
            require_external_service: false,
        }
    }

    /// price and save only
    pub fn silent() -> Self {
        Self {
            notify_applicant: false,
            call_external_service: false,
            require_notification: false,
            require_external_service: false,
        }
    }

    /// run every collaborator and fail on any delivery failure
    pub fn strict() -> Self {
        Self {
            notify_applicant: true,
            call_external_service: true,
            require_notification: true,
            require_external_service: true,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// requiring a collaborator that is switched off is a contradiction
    pub fn validate(&self) -> Result<()> {
        if self.require_notification && !self.notify_applicant {
            return Err(LoanError::InvalidConfiguration {
                message: "require_notification set but notify_applicant is off".to_string(),
            });
        }

        if self.require_external_service && !self.call_external_service {
            return Err(LoanError::InvalidConfiguration {
                message: "require_external_service set but call_external_service is off"
                    .to_string(),
            });
        }

        Ok(())
    }
}
