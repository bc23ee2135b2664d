//! Common arithmetic for deal calculations.
//!
//! Dealership pricing truncates every produced currency value toward zero at
//! the cent. Nothing in this crate uses nearest-value rounding for money.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::Money;

/// Truncates a dollar amount toward zero to two decimal places.
///
/// This is `floor(x × 100) / 100` for non-negative values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use deal_core::calculations::common::truncate_to_cents;
///
/// assert_eq!(truncate_to_cents(dec!(734.6)), dec!(734.60));
/// assert_eq!(truncate_to_cents(dec!(60.909)), dec!(60.90));
/// assert_eq!(truncate_to_cents(dec!(-60.909)), dec!(-60.90));
/// ```
pub fn truncate_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

/// Truncates a dollar amount to whole cents and converts it to [`Money`].
///
/// Values beyond the representable range saturate.
pub fn money_truncated(value: Decimal) -> Money {
    Money::from_decimal_truncated(truncate_to_cents(value)).unwrap_or(if value.is_sign_negative() {
        Money::from_cents(i64::MIN)
    } else {
        Money::from_cents(i64::MAX)
    })
}

/// Computes `amount × numerator / denominator`, truncated to the cent.
///
/// A zero denominator yields zero.
pub fn scale_truncated(
    amount: Money,
    numerator: Decimal,
    denominator: Decimal,
) -> Money {
    amount
        .to_decimal()
        .saturating_mul(numerator)
        .checked_div(denominator)
        .map(money_truncated)
        .unwrap_or(Money::ZERO)
}
