//! Whole-cent currency amounts.
//!
//! Every currency value inside the engine is a [`Money`]: a signed count of
//! cents. Conversion to and from [`Decimal`] happens only at the boundary,
//! where user input is parsed or results are handed back for display.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised when converting a decimal amount into [`Money`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount carries fractions of a cent.
    #[error("amount {0} has more than two decimal places")]
    SubCentPrecision(Decimal),

    /// The amount does not fit in the cent range.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),

    /// The text could not be parsed as a decimal number.
    #[error("invalid amount '{0}'")]
    Invalid(String),
}

/// Largest magnitude accepted from outside the engine: one trillion dollars.
pub const MAX_INPUT_DOLLARS: i64 = 1_000_000_000_000;

/// A currency amount held as whole cents.
///
/// Arithmetic saturates at the `i64` range instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// One cent; the payoff tolerance of the amortization loop.
    pub const CENT: Money = Money(1);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Builds an amount from whole dollars and cents, e.g. `from_major_minor(139, 50)`.
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        Self(major * 100 + minor)
    }

    /// Converts a decimal amount that is already expressed in whole cents.
    ///
    /// # Errors
    ///
    /// [`MoneyError::SubCentPrecision`] when the value has a non-zero third
    /// decimal place, [`MoneyError::OutOfRange`] when its magnitude exceeds
    /// [`MAX_INPUT_DOLLARS`].
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        if value.normalize().scale() > 2 {
            return Err(MoneyError::SubCentPrecision(value));
        }
        if value.abs() > Decimal::from(MAX_INPUT_DOLLARS) {
            return Err(MoneyError::OutOfRange(value));
        }
        Self::from_decimal_truncated(value)
    }

    /// Converts a decimal amount, dropping any fraction of a cent toward zero.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use deal_core::Money;
    ///
    /// assert_eq!(Money::from_decimal_truncated(dec!(734.6079)).unwrap(), Money::from_cents(73460));
    /// assert_eq!(Money::from_decimal_truncated(dec!(-1.999)).unwrap(), Money::from_cents(-199));
    /// ```
    pub fn from_decimal_truncated(value: Decimal) -> Result<Self, MoneyError> {
        value
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::ToZero))
            .and_then(|cents| cents.to_i64())
            .map(Self)
            .ok_or(MoneyError::OutOfRange(value))
    }

    /// The amount as a two-decimal [`Decimal`].
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Whole-cent multiple, saturating at the `i64` range.
    pub const fn saturating_mul(self, factor: i64) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Decimal = s
            .trim()
            .parse()
            .map_err(|_| MoneyError::Invalid(s.to_string()))?;
        Self::from_decimal(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

// Serialized as a decimal amount so CSV and JSON carry `1234.56`, not cents.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::from_decimal(value).map_err(serde::de::Error::custom)
    }
}
