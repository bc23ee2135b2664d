//! Tunable constants for the deal calculator.
//!
//! Tax rates are the dealership's pricing convention; solver limits are the
//! safety valves that keep every computation bounded. Both default to the
//! values the desk uses today and can be overridden from a settings file.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Money;

/// Binary-search iteration cap used by the payment solver.
pub const DEFAULT_MAX_SEARCH_ITERATIONS: u32 = 100;

/// Simulation period cap shared by the payment and term solvers.
pub const DEFAULT_MAX_PERIODS: u32 = 1000;

/// Errors raised when a [`CalculatorConfig`] is outside its valid range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculatorConfigError {
    #[error("state tax rate must be between 0 and 1, got {0}")]
    InvalidStateTaxRate(Decimal),

    #[error("business tax rate must be between 0 and 1, got {0}")]
    InvalidBusinessTaxRate(Decimal),

    #[error("local tax must be non-negative, got {0}")]
    NegativeLocalTax(Money),

    #[error("search iteration limit must be positive")]
    ZeroSearchIterations,

    #[error("period limit must be positive")]
    ZeroMaxPeriods,
}

/// Retail tax rates applied to the sales price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRates {
    /// Fraction of the sales price owed as state tax.
    pub state_rate: Decimal,

    /// Fraction of the sales price owed as business (B&O) tax.
    pub business_rate: Decimal,

    /// Flat local tax charged on every retail sale.
    pub local_tax: Money,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            state_rate: dec!(0.07346),
            business_rate: dec!(0.003045),
            local_tax: Money::from_major_minor(44, 0),
        }
    }
}

impl TaxRates {
    /// Validates the rates.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorConfigError`] if a rate is outside `[0, 1]` or the
    /// local tax is negative.
    pub fn validate(&self) -> Result<(), CalculatorConfigError> {
        if !is_fraction(self.state_rate) {
            return Err(CalculatorConfigError::InvalidStateTaxRate(self.state_rate));
        }
        if !is_fraction(self.business_rate) {
            return Err(CalculatorConfigError::InvalidBusinessTaxRate(self.business_rate));
        }
        if self.local_tax.is_negative() {
            return Err(CalculatorConfigError::NegativeLocalTax(self.local_tax));
        }
        Ok(())
    }
}

/// Iteration bounds for the solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverLimits {
    /// Maximum binary-search steps when solving for a payment.
    pub max_search_iterations: u32,

    /// Maximum simulated payment periods for any schedule.
    pub max_periods: u32,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_search_iterations: DEFAULT_MAX_SEARCH_ITERATIONS,
            max_periods: DEFAULT_MAX_PERIODS,
        }
    }
}

impl SolverLimits {
    pub fn validate(&self) -> Result<(), CalculatorConfigError> {
        if self.max_search_iterations == 0 {
            return Err(CalculatorConfigError::ZeroSearchIterations);
        }
        if self.max_periods == 0 {
            return Err(CalculatorConfigError::ZeroMaxPeriods);
        }
        Ok(())
    }
}

/// Complete configuration for a [`DealCalculator`](super::DealCalculator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub tax: TaxRates,
    pub limits: SolverLimits,
}

impl CalculatorConfig {
    pub fn validate(&self) -> Result<(), CalculatorConfigError> {
        self.tax.validate()?;
        self.limits.validate()
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}
