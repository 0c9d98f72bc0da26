use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a loan application
pub type LoanId = Uuid;

/// application status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// received, repayment not yet calculated
    Submitted,
    /// repayment calculated and recorded
    Priced,
}

/// which field of a loan request failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanField {
    Principal,
    InterestRate,
}

impl LoanField {
    pub fn name(&self) -> &'static str {
        match self {
            LoanField::Principal => "principal",
            LoanField::InterestRate => "annual_interest_rate",
        }
    }
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
