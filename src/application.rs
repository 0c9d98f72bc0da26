use chrono::{DateTime, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::repayment::LoanRequest;
use crate::types::{ApplicationStatus, LoanId};

/// loan application record
///
/// Holds the terms as submitted; they are not validated here. Validation
/// happens when the repayment is calculated, so an application with a zero
/// term can exist and will be rejected by the processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub id: LoanId,
    pub applicant_name: String,
    pub principal: Money,
    pub term_in_months: i32,
    pub annual_interest_rate: Rate,
    pub repayment: Option<Money>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub priced_at: Option<DateTime<Utc>>,
}

impl LoanApplication {
    pub fn new(
        applicant_name: impl Into<String>,
        principal: Money,
        term_in_months: i32,
        annual_interest_rate: Rate,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            applicant_name: applicant_name.into(),
            principal,
            term_in_months,
            annual_interest_rate,
            repayment: None,
            status: ApplicationStatus::Submitted,
            submitted_at,
            priced_at: None,
        }
    }

    pub fn builder() -> LoanApplicationBuilder {
        LoanApplicationBuilder::new()
    }

    /// snapshot the terms as an immutable request
    pub fn to_request(&self) -> LoanRequest {
        LoanRequest::new(self.principal, self.term_in_months, self.annual_interest_rate)
    }

    /// record the calculated monthly repayment
    pub fn set_repayment(&mut self, repayment: Money, priced_at: DateTime<Utc>) {
        self.repayment = Some(repayment);
        self.status = ApplicationStatus::Priced;
        self.priced_at = Some(priced_at);
    }

    pub fn is_priced(&self) -> bool {
        self.status == ApplicationStatus::Priced
    }

    /// get application as pretty json
    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    /// restore an application from json
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// builder for loan applications
#[derive(Debug, Default)]
pub struct LoanApplicationBuilder {
    applicant_name: Option<String>,
    principal: Option<Money>,
    term_months: Option<i32>,
    rate: Option<Rate>,
    submitted_at: Option<DateTime<Utc>>,
}

impl LoanApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applicant(mut self, name: impl Into<String>) -> Self {
        self.applicant_name = Some(name.into());
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn term_months(mut self, months: i32) -> Self {
        self.term_months = Some(months);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = Some(at);
        self
    }

    /// build stamped with system time
    pub fn build(self) -> Result<LoanApplication> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.build_with_time(&time)
    }

    /// build stamped with the given time provider
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<LoanApplication> {
        let principal = self.principal.ok_or(LoanError::InvalidConfiguration {
            message: "Principal required".to_string(),
        })?;

        let term = self.term_months.ok_or(LoanError::InvalidConfiguration {
            message: "Term required".to_string(),
        })?;

        let rate = self.rate.ok_or(LoanError::InvalidConfiguration {
            message: "Rate required".to_string(),
        })?;

        let submitted_at = self.submitted_at.unwrap_or_else(|| time_provider.now());

        Ok(LoanApplication::new(
            self.applicant_name.unwrap_or_default(),
            principal,
            term,
            rate,
            submitted_at,
        ))
    }
}
