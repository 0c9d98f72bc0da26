use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Money type backed by an exact decimal, never rounded implicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str_exact(s)?))
    }

    /// create from integer amount (pounds, dollars, euros)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (pence, cents)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        Money(Decimal::new(amount, scale))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round up to the next whole currency unit
    pub fn ceil_whole(&self) -> Self {
        Money(self.0.round_dp_with_strategy(0, RoundingStrategy::ToPositiveInfinity))
    }

    /// true when the amount has no fractional part
    pub fn is_whole(&self) -> bool {
        self.0.fract().is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly below zero; negative zero is not negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// multiply by a whole number of periods
    pub fn times(&self, periods: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(periods)).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

/// annual interest rate held as a percentage (10 means 10%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from a percentage decimal (e.g., 6.5 for 6.5%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p)
    }

    /// create from a whole percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p))
    }

    /// create from basis points (e.g., 650 for 6.5%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::from(bps) / Decimal::ONE_HUNDRED)
    }

    /// create from string with exact parsing, as a percentage
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Rate(Decimal::from_str_exact(s)?))
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0
    }

    /// strictly below zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for Rate {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rate::from_str_exact(s)
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_percent(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_keeps_exact_value() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.123456789");
    }

    #[test]
    fn test_minor_units() {
        let pounds = Money::from_minor(12_050, 2);
        assert_eq!(pounds.as_decimal(), dec!(120.50));
        assert!(!pounds.is_whole());
    }

    #[test]
    fn test_ceil_whole() {
        assert_eq!(Money::from_decimal(dec!(110.0000001)).ceil_whole(), Money::from_major(111));
        assert_eq!(Money::from_decimal(dec!(110.41666)).ceil_whole(), Money::from_major(111));
        assert_eq!(Money::from_decimal(dec!(110)).ceil_whole(), Money::from_major(110));
        assert_eq!(Money::ZERO.ceil_whole(), Money::ZERO);
        assert!(Money::from_decimal(dec!(110.5)).ceil_whole().is_whole());
    }

    #[test]
    fn test_negative_zero_is_not_negative() {
        let neg_zero = Money::from_str_exact("-0").unwrap();
        assert!(!neg_zero.is_negative());
        assert!(Money::from_major(-1).is_negative());
    }

    #[test]
    fn test_rate_conversions() {
        let rate = Rate::from_percent(dec!(6.5));
        assert_eq!(rate.as_percentage(), dec!(6.5));
        assert_eq!(Rate::from_bps(650), rate);
        assert_eq!(Rate::from_percentage(10).to_string(), "10%");
    }
}
