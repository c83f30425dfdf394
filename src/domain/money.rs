use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A monetary value backed by `rust_decimal::Decimal`.
///
/// Salaries, bonuses, deductions and net pay all flow through this type so that
/// payroll arithmetic stays exact. Negative values are representable: a net
/// salary is allowed to go below zero when deductions exceed basic pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

// Written normalized: 5300.00 is emitted as "5300".
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&self.0.normalize(), serializer)
    }
}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_arithmetic() {
        let m1 = Money::new(dec!(10.0));
        let m2 = Money::new(dec!(5.0));
        assert_eq!(m1 + m2, Money::new(dec!(15.0)));
        assert_eq!(m1 - m2, Money::new(dec!(5.0)));
        assert_eq!(m2 - m1, Money::new(dec!(-5.0)));
    }

    #[test]
    fn test_money_sign_checks() {
        assert!(Money::new(dec!(0.01)).is_positive());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
        assert!(Money::new(dec!(-0.01)).is_negative());
    }

    #[test]
    fn test_money_sum() {
        let values = [Money::new(dec!(1000)), Money::new(dec!(1200.50))];
        let total: Money = values.iter().sum();
        assert_eq!(total, Money::new(dec!(2200.50)));
    }

    #[test]
    fn test_money_parse() {
        assert_eq!("500".parse::<Money>().unwrap(), Money::new(dec!(500)));
        assert_eq!(" 0.25 ".parse::<Money>().unwrap(), Money::new(dec!(0.25)));
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_money_display_drops_trailing_zeros() {
        assert_eq!(Money::new(dec!(5300.00)).to_string(), "5300");
        assert_eq!(Money::new(dec!(0.0200)).to_string(), "0.02");
    }

    #[test]
    fn test_money_serializes_normalized() {
        let json = serde_json::to_string(&Money::new(dec!(5300.00))).unwrap();
        assert_eq!(json, "\"5300\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::new(dec!(5300)));
    }
}
