//! Currency and rate parsing for command-line input, and currency display.
//!
//! Parsing is the only way text becomes a [`Money`]; formatting is a pure
//! projection of a [`Money`] back to text. Neither keeps any state.

use std::sync::LazyLock;

use deal_core::{Money, MoneyError, PaymentFrequency, SaleType};
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Optional sign, optional `$`, digits with or without comma grouping, and
/// an optional fraction.
static AMOUNT_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^-?\$?(\d{1,3}(,\d{3})+|\d*)(\.\d+)?$"));

/// Error returned when a string cannot be parsed as a [`Money`] amount.
#[derive(Debug, Error)]
pub enum ParseMoneyError {
    #[error("invalid amount '{0}'")]
    Invalid(String),

    #[error("amount '{0}' must not be negative")]
    Negative(String),

    #[error("invalid amount '{input}': {source}")]
    Amount {
        input: String,
        #[source]
        source: MoneyError,
    },

    #[error("amount pattern failed to compile: {0}")]
    Pattern(String),
}

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Parses a currency amount such as `20000`, `1,234.56` or `$1,234.56`.
///
/// Empty or whitespace-only input is treated as 0. Negative amounts and
/// fractions of a cent are rejected rather than adjusted.
pub fn parse_money(s: &str) -> Result<Money, ParseMoneyError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Money::ZERO);
    }

    let pattern = AMOUNT_PATTERN
        .as_ref()
        .map_err(|e| ParseMoneyError::Pattern(e.to_string()))?;
    if !pattern.is_match(trimmed) || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        tracing::warn!(input = %s, "invalid amount");
        return Err(ParseMoneyError::Invalid(s.to_string()));
    }

    let normalized = trimmed.replace(['$', ','], "");
    let value: Decimal = normalized
        .parse()
        .map_err(|_| ParseMoneyError::Invalid(s.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        tracing::warn!(input = %s, "negative amount");
        return Err(ParseMoneyError::Negative(s.to_string()));
    }

    Money::from_decimal(value).map_err(|source| {
        tracing::warn!(input = %s, "invalid amount: {}", source);
        ParseMoneyError::Amount {
            input: s.to_string(),
            source,
        }
    })
}

/// Parses an APR percentage such as `19.99` or `19.99%`.
pub fn parse_apr(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = s.trim().trim_end_matches('%').trim_end();
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid APR: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

pub fn parse_frequency(s: &str) -> Result<PaymentFrequency, String> {
    PaymentFrequency::parse(s).ok_or_else(|| {
        format!("unknown frequency '{s}' (expected weekly, biweekly, semimonthly or monthly)")
    })
}

pub fn parse_sale_type(s: &str) -> Result<SaleType, String> {
    SaleType::parse(s).ok_or_else(|| format!("unknown sale type '{s}' (expected retail or wholesale)"))
}

/// Formats an amount as `$1,234.56`, with a leading `-` when negative.
pub fn format_currency(amount: Money) -> String {
    let cents = amount.cents().unsigned_abs();
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Formats an APR for display, e.g. `19.99%`.
pub fn format_apr(apr: Decimal) -> String {
    format!("{}%", apr.normalize())
}
