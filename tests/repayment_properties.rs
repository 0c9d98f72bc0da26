//! Property tests for the repayment calculator.
//!
//! Invariants checked over generated inputs:
//! - identical inputs give identical outputs
//! - the monthly repayment is a non-negative whole amount
//! - the payments cover principal plus interest
//! - the payments overshoot by less than one unit per month
//! - invalid terms and negative amounts are always rejected
//! - inputs too precise to price exactly are refused, never rounded

use loan_repayment_rs::{compute_monthly_repayment, Decimal, LoanError, LoanField, Money, Rate};
use proptest::prelude::*;

/// principal up to a trillion, anywhere from whole units to 12 decimal places
fn principal() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000, 0u32..=12).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// annual rate up to 100%, with up to 6 decimal places
fn rate() -> impl Strategy<Value = Decimal> {
    (0u32..=6).prop_flat_map(|scale| {
        (0i64..=100 * 10i64.pow(scale)).prop_map(move |mantissa| Decimal::new(mantissa, scale))
    })
}

fn term() -> impl Strategy<Value = i32> {
    1i32..=600
}

/// (monthly * term * 1200, principal * (1200 + rate * term)) as integers,
/// both scaled by 10^(principal scale + rate scale) so the comparison is exact
fn scaled_paid_and_total(monthly: Money, principal: Decimal, term: i32, rate: Decimal) -> (i128, i128) {
    let shift = 10i128.pow(principal.scale() + rate.scale());
    let t = i128::from(term);

    let paid = monthly.as_decimal().mantissa() * t * 1200 * shift;
    let total = principal.mantissa() * (1200 * 10i128.pow(rate.scale()) + rate.mantissa() * t);
    (paid, total)
}

proptest! {
    #[test]
    fn prop_deterministic(p in principal(), t in term(), r in rate()) {
        let first = compute_monthly_repayment(Money::from_decimal(p), t, Rate::from_percent(r)).unwrap();
        let second = compute_monthly_repayment(Money::from_decimal(p), t, Rate::from_percent(r)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_non_negative_whole_units(p in principal(), t in term(), r in rate()) {
        let monthly = compute_monthly_repayment(Money::from_decimal(p), t, Rate::from_percent(r)).unwrap();
        prop_assert!(!monthly.is_negative());
        prop_assert!(monthly.is_whole());
    }

    #[test]
    fn prop_payments_cover_total(p in principal(), t in term(), r in rate()) {
        let monthly = compute_monthly_repayment(Money::from_decimal(p), t, Rate::from_percent(r)).unwrap();
        let (paid, total) = scaled_paid_and_total(monthly, p, t, r);
        prop_assert!(paid >= total, "{} * {} does not cover {} at {}%", monthly, t, p, r);
    }

    #[test]
    fn prop_overshoot_below_one_unit_per_month(p in principal(), t in term(), r in rate()) {
        let monthly = compute_monthly_repayment(Money::from_decimal(p), t, Rate::from_percent(r)).unwrap();
        let (paid, total) = scaled_paid_and_total(monthly, p, t, r);
        let one_unit_per_month = i128::from(t) * 1200 * 10i128.pow(p.scale() + r.scale());
        prop_assert!(paid < total + one_unit_per_month, "{} * {} overshoots {} at {}%", monthly, t, p, r);
    }

    #[test]
    fn prop_non_positive_term_rejected(p in principal(), t in i32::MIN..=0, r in rate()) {
        let err = compute_monthly_repayment(Money::from_decimal(p), t, Rate::from_percent(r)).unwrap_err();
        prop_assert!(matches!(err, LoanError::InvalidTerm { term } if term == t), "unexpected error: {:?}", err);
    }

    #[test]
    fn prop_negative_principal_rejected(pence in 1i64..1_000_000_000, t in term(), r in rate()) {
        let p = Decimal::new(-pence, 2);
        let err = compute_monthly_repayment(Money::from_decimal(p), t, Rate::from_percent(r)).unwrap_err();
        prop_assert!(
            matches!(err, LoanError::InvalidAmount { field: LoanField::Principal, .. }),
            "unexpected error: {:?}", err
        );
    }

    #[test]
    fn prop_negative_rate_rejected(p in principal(), t in term(), hundredths in 1i64..10_000) {
        let r = Decimal::new(-hundredths, 2);
        let err = compute_monthly_repayment(Money::from_decimal(p), t, Rate::from_percent(r)).unwrap_err();
        prop_assert!(
            matches!(err, LoanError::InvalidAmount { field: LoanField::InterestRate, .. }),
            "unexpected error: {:?}", err
        );
    }

    #[test]
    fn prop_deep_scale_is_whole_or_refused(
        mantissa in 0i64..=i64::MAX,
        principal_scale in 0u32..=28,
        rate_hundredths in 0i64..10_000,
        t in term(),
    ) {
        let p = Decimal::new(mantissa, principal_scale);
        let r = Decimal::new(rate_hundredths, 2);
        match compute_monthly_repayment(Money::from_decimal(p), t, Rate::from_percent(r)) {
            Ok(monthly) => {
                prop_assert!(monthly.is_whole());
                prop_assert!(!monthly.is_negative());
            }
            Err(err) => prop_assert!(
                matches!(err, LoanError::PrecisionExceeded { .. } | LoanError::CalculationOverflow { .. }),
                "unexpected error: {:?}", err
            ),
        }
    }
}
