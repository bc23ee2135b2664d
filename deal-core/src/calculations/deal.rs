//! Full deal quote.
//!
//! | Line             | Value                                                |
//! |------------------|------------------------------------------------------|
//! | Taxes            | [`TaxEngine`] on the sales price                     |
//! | Total price      | sales price + doc fee + title fee + taxes            |
//! | Amount financed  | total price − down payment                           |
//! | Solved field     | payment ([`PaymentSolver`]) or term ([`TermSolver`]) |
//! | Finance charge   | interest over the solved schedule                    |
//! | Balance due      | amount financed + finance charge                     |
//!
//! The deal's mode decides which solver runs. In `ByTerm` only
//! `term_months` is read; in `ByPayment` only `payment_amount` is read.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use deal_core::{compute_deal, DealInputs, DealMode, Money, PaymentFrequency, SaleType};
//!
//! let inputs = DealInputs {
//!     sale_type: SaleType::Retail,
//!     sales_price: Money::from_major_minor(20000, 0),
//!     doc_fee: Money::from_major_minor(299, 0),
//!     title_fee: Money::from_major_minor(139, 50),
//!     down_payment: Money::from_major_minor(2000, 0),
//!     apr: dec!(19.99),
//!     frequency: PaymentFrequency::Monthly,
//!     mode: DealMode::ByTerm,
//!     term_months: 60,
//!     payment_amount: Money::ZERO,
//! };
//!
//! let quote = compute_deal(&inputs);
//!
//! assert_eq!(quote.totals.total_price, Money::from_major_minor(22012, 60));
//! assert_eq!(quote.totals.amount_financed, Money::from_major_minor(20012, 60));
//! assert_eq!(quote.solver.solved_payment(), Some(Money::from_major_minor(530, 10)));
//! ```

use tracing::debug;

use crate::calculations::{
    CalculatorConfig, CalculatorConfigError, PaymentSolver, TaxEngine, TermSolver,
};
use crate::{DealInputs, DealMode, DealQuote, DerivedAmounts, Money, SolverResult, TaxBreakdown};

/// Quotes deals against one validated configuration.
#[derive(Debug, Clone, Default)]
pub struct DealCalculator {
    config: CalculatorConfig,
}

impl DealCalculator {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorConfigError`] if a rate or limit is out of range.
    pub fn new(config: CalculatorConfig) -> Result<Self, CalculatorConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Computes taxes, totals, and the solved field for `inputs`.
    ///
    /// Never fails: missing or impossible inputs are reported through
    /// [`SolverResult::status`].
    pub fn calculate(
        &self,
        inputs: &DealInputs,
    ) -> DealQuote {
        let taxes = TaxEngine::new(&self.config.tax).calculate(inputs.sale_type, inputs.sales_price);
        let total_price = self.total_price(inputs, &taxes);
        let amount_financed = total_price - inputs.down_payment;

        let solver = self.solve(inputs, amount_financed);
        let totals = DerivedAmounts {
            total_price,
            amount_financed,
            finance_charge: solver.finance_charge,
            balance_due: amount_financed + solver.finance_charge,
        };

        debug!(
            mode = inputs.mode.as_str(),
            total_price = %totals.total_price,
            amount_financed = %totals.amount_financed,
            status = ?solver.status,
            "quoted deal"
        );

        DealQuote {
            taxes,
            totals,
            solver,
        }
    }

    fn total_price(
        &self,
        inputs: &DealInputs,
        taxes: &TaxBreakdown,
    ) -> Money {
        inputs.sales_price + inputs.doc_fee + inputs.title_fee + taxes.total()
    }

    fn solve(
        &self,
        inputs: &DealInputs,
        principal: Money,
    ) -> SolverResult {
        let limits = &self.config.limits;
        match inputs.mode {
            DealMode::ByTerm => PaymentSolver::new(limits).solve(
                principal,
                inputs.apr,
                inputs.term_months,
                inputs.frequency,
            ),
            DealMode::ByPayment => TermSolver::new(limits).solve(
                principal,
                inputs.apr,
                inputs.payment_amount,
                inputs.frequency,
            ),
        }
    }
}

/// Quotes `inputs` with the default dealership configuration.
pub fn compute_deal(inputs: &DealInputs) -> DealQuote {
    DealCalculator::default().calculate(inputs)
}
