use thiserror::Error;

use rust_decimal::Decimal;

use crate::types::LoanField;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid term: {term} months, term must be at least one month")]
    InvalidTerm {
        term: i32,
    },

    #[error("invalid amount: {field} is {value}, must not be negative")]
    InvalidAmount {
        field: LoanField,
        value: Decimal,
    },

    #[error("calculation overflow: principal {principal}, term {term}, rate {rate}")]
    CalculationOverflow {
        principal: Decimal,
        term: i32,
        rate: Decimal,
    },

    #[error("precision exceeded: principal {principal}, term {term}, rate {rate} need more than 28 digits")]
    PrecisionExceeded {
        principal: Decimal,
        term: i32,
        rate: Decimal,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("loan store failure: {message}")]
    Store {
        message: String,
    },

    #[error("notification failure: {message}")]
    Notification {
        message: String,
    },

    #[error("external service failure: {message}")]
    ExternalService {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LoanError {
    /// true for errors caused by the loan terms themselves
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, LoanError::InvalidTerm { .. } | LoanError::InvalidAmount { .. })
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
