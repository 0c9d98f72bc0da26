use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::LoanField;

/// percent divisor times months per year; rate% * months / 1200 gives the interest fraction
const PERCENT_MONTHS: Decimal = Decimal::from_parts(1200, 0, 0, false, 0);

/// loan terms for a single repayment calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: Money,
    pub term_in_months: i32,
    /// annual rate as a percentage
    pub annual_interest_rate: Rate,
}

impl LoanRequest {
    pub fn new(principal: Money, term_in_months: i32, annual_interest_rate: Rate) -> Self {
        Self {
            principal,
            term_in_months,
            annual_interest_rate,
        }
    }

    /// check the terms; the term is checked before amounts
    pub fn validate(&self) -> Result<u32> {
        if self.term_in_months <= 0 {
            return Err(LoanError::InvalidTerm {
                term: self.term_in_months,
            });
        }

        if self.principal.is_negative() {
            return Err(LoanError::InvalidAmount {
                field: LoanField::Principal,
                value: self.principal.as_decimal(),
            });
        }

        if self.annual_interest_rate.is_negative() {
            return Err(LoanError::InvalidAmount {
                field: LoanField::InterestRate,
                value: self.annual_interest_rate.as_percentage(),
            });
        }

        Ok(self.term_in_months as u32)
    }
}

/// outcome of a repayment calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentResult {
    /// whole currency units due each month
    pub monthly_repayment: Money,
    pub term_in_months: u32,
    /// rounded to 28 significant digits when the division does not terminate
    pub total_interest: Money,
    /// rounded to 28 significant digits when the division does not terminate
    pub total_repayable: Money,
}

impl RepaymentResult {
    /// sum of all monthly repayments over the term
    pub fn total_of_payments(&self) -> Option<Money> {
        self.monthly_repayment.times(self.term_in_months)
    }

    /// amount collected above the total repayable because of rounding up,
    /// as precise as `total_repayable`
    pub fn rounding_surplus(&self) -> Option<Money> {
        self.total_of_payments().map(|total| total - self.total_repayable)
    }
}

/// simple-interest repayment calculator
///
/// Interest accrues on the full principal for the whole term:
/// `principal * rate / 100 * term / 12`. Principal plus interest is spread
/// evenly over the term and each monthly repayment is rounded up to a whole
/// currency unit, so the payments always cover the total repayable.
///
/// The calculator holds no state and performs no I/O; it can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepaymentCalculator;

impl RepaymentCalculator {
    pub fn new() -> Self {
        Self
    }

    /// calculate the monthly repayment for a loan request
    pub fn calculate(&self, request: &LoanRequest) -> Result<RepaymentResult> {
        let term_in_months = request.validate()?;

        // normalized so an exact product keeps exactly the summed scale
        let principal = request.principal.as_decimal().normalize();
        let rate = request.annual_interest_rate.as_percentage().normalize();
        let term = Decimal::from(term_in_months);

        let overflow = || LoanError::CalculationOverflow {
            principal,
            term: request.term_in_months,
            rate,
        };
        let inexact = || LoanError::PrecisionExceeded {
            principal,
            term: request.term_in_months,
            rate,
        };
        let exact = |value: Option<Decimal>, expected_scale: u32| match value {
            None => Err(overflow()),
            Some(v) if v.is_zero() || v.scale() == expected_scale => Ok(v),
            Some(_) => Err(inexact()),
        };

        // total repayable * 1200 = principal * (1200 + rate * term)
        let interest_factor = exact(rate.checked_mul(term), rate.scale())?;
        let factor = exact(
            interest_factor.checked_add(PERCENT_MONTHS),
            interest_factor.scale(),
        )?;
        let scaled_total = exact(principal.checked_mul(factor), principal.scale() + factor.scale())?;
        let denominator = PERCENT_MONTHS.checked_mul(term).ok_or_else(overflow)?;

        let raw_monthly = scaled_total.checked_div(denominator).ok_or_else(overflow)?;
        let mut monthly = Money::from_decimal(raw_monthly).ceil_whole().as_decimal();

        // the quotient carries at most 28 digits; a value a hair above a whole
        // unit can round down onto it, so settle the ceiling on the exact product
        let covered = monthly.checked_mul(denominator).ok_or_else(overflow)?;
        if covered < scaled_total {
            monthly = monthly.checked_add(Decimal::ONE).ok_or_else(overflow)?;
        }

        // non-terminating for most terms, rounded to 28 significant digits
        let total_repayable = scaled_total.checked_div(PERCENT_MONTHS).ok_or_else(overflow)?;
        let total_interest = total_repayable - principal;

        debug!(
            principal = %principal,
            term_in_months,
            rate = %rate,
            raw_monthly = %raw_monthly,
            monthly_repayment = %monthly,
            "repayment calculated"
        );

        Ok(RepaymentResult {
            monthly_repayment: Money::from_decimal(monthly.normalize()),
            term_in_months,
            total_interest: Money::from_decimal(total_interest),
            total_repayable: Money::from_decimal(total_repayable),
        })
    }
}

/// compute the monthly repayment, rounded up to a whole currency unit
pub fn compute_monthly_repayment(
    principal: Money,
    term_in_months: i32,
    annual_interest_rate: Rate,
) -> Result<Money> {
    let request = LoanRequest::new(principal, term_in_months, annual_interest_rate);
    RepaymentCalculator::new()
        .calculate(&request)
        .map(|result| result.monthly_repayment)
}
