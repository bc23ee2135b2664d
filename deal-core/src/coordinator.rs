//! Which side of the deal drives the other.
//!
//! A deal has two fields that can each be derived from the other: the term
//! and the payment. [`DealMode`] names the one the salesperson typed in. The
//! coordinator runs exactly one solver per recompute and writes only the
//! derived field, so a derived value is never fed back as an input.
//!
//! | Mode        | Solver            | Reads            | Overwrites       |
//! |-------------|-------------------|------------------|------------------|
//! | `ByTerm`    | [`PaymentSolver`] | `term_months`    | `payment_amount` |
//! | `ByPayment` | [`TermSolver`]    | `payment_amount` | `term_months`    |
//!
//! [`PaymentSolver`]: crate::calculations::PaymentSolver
//! [`TermSolver`]: crate::calculations::TermSolver
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use deal_core::{DealEdit, DealInputs, DealSession, Money};
//!
//! let mut session = DealSession::new(DealInputs {
//!     sales_price: Money::from_major_minor(20000, 0),
//!     apr: dec!(19.99),
//!     term_months: 60,
//!     ..DealInputs::default()
//! });
//!
//! let stamped = session.apply(DealEdit::DownPayment(Money::from_major_minor(1574, 10))).unwrap();
//!
//! assert_eq!(stamped.revision, 1);
//! assert!(stamped.quote.solver.is_solved());
//! assert_eq!(session.inputs().payment_amount, stamped.quote.solver.solved_payment().unwrap());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::DealCalculator;
use crate::{DealInputs, DealMode, DealQuote, Money, PaymentFrequency, SaleType, Solved};

/// A single field change coming from the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealEdit {
    SaleType(SaleType),
    SalesPrice(Money),
    DocFee(Money),
    TitleFee(Money),
    DownPayment(Money),
    Apr(Decimal),
    Frequency(PaymentFrequency),
    TermMonths(u32),
    PaymentAmount(Money),
    Mode(DealMode),
}

impl DealEdit {
    /// Whether this edit, made while the deal is in `mode`, needs a recompute.
    ///
    /// Editing the derived field never does, and neither does a mode switch:
    /// the value derived under the old mode becomes the new independent input.
    pub fn triggers_recompute(
        &self,
        mode: DealMode,
    ) -> bool {
        match self {
            Self::TermMonths(_) => mode == DealMode::ByTerm,
            Self::PaymentAmount(_) => mode == DealMode::ByPayment,
            Self::Mode(_) => false,
            Self::SaleType(_)
            | Self::SalesPrice(_)
            | Self::DocFee(_)
            | Self::TitleFee(_)
            | Self::DownPayment(_)
            | Self::Apr(_)
            | Self::Frequency(_) => true,
        }
    }

    fn apply_to(
        self,
        inputs: &mut DealInputs,
    ) {
        match self {
            Self::SaleType(value) => inputs.sale_type = value,
            Self::SalesPrice(value) => inputs.sales_price = value,
            Self::DocFee(value) => inputs.doc_fee = value,
            Self::TitleFee(value) => inputs.title_fee = value,
            Self::DownPayment(value) => inputs.down_payment = value,
            Self::Apr(value) => inputs.apr = value,
            Self::Frequency(value) => inputs.frequency = value,
            Self::TermMonths(value) => inputs.term_months = value,
            Self::PaymentAmount(value) => inputs.payment_amount = value,
            Self::Mode(value) => inputs.mode = value,
        }
    }
}

/// Runs the solver selected by the deal's mode and writes back the result.
#[derive(Debug, Clone, Default)]
pub struct ModeCoordinator {
    calculator: DealCalculator,
}

impl ModeCoordinator {
    pub fn new(calculator: DealCalculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &DealCalculator {
        &self.calculator
    }

    /// Quotes `inputs` and overwrites the derived field with the solved value.
    ///
    /// When the solver cannot produce a schedule the derived field is set
    /// to zero, matching the quote.
    pub fn recompute(
        &self,
        inputs: &mut DealInputs,
    ) -> DealQuote {
        let quote = self.calculator.calculate(inputs);

        match quote.solver.solved {
            Solved::Payment(payment) => inputs.payment_amount = payment,
            Solved::TermMonths(term_months) => inputs.term_months = term_months,
        }

        quote
    }
}

/// A quote tagged with the revision of the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampedQuote {
    pub revision: u64,
    pub quote: DealQuote,
}

/// One open deal: the current inputs plus an edit counter.
///
/// Every applied edit bumps the revision, whether or not it recomputes, so a
/// caller holding a [`StampedQuote`] can tell whether it is still current.
#[derive(Debug, Clone)]
pub struct DealSession {
    coordinator: ModeCoordinator,
    inputs: DealInputs,
    revision: u64,
}

impl DealSession {
    /// Opens a session with the default calculator.
    pub fn new(inputs: DealInputs) -> Self {
        Self::with_coordinator(ModeCoordinator::default(), inputs)
    }

    pub fn with_coordinator(
        coordinator: ModeCoordinator,
        inputs: DealInputs,
    ) -> Self {
        Self {
            coordinator,
            inputs,
            revision: 0,
        }
    }

    pub fn inputs(&self) -> &DealInputs {
        &self.inputs
    }

    pub fn mode(&self) -> DealMode {
        self.inputs.mode
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true if `stamped` was computed from the current inputs.
    pub fn is_current(
        &self,
        stamped: &StampedQuote,
    ) -> bool {
        stamped.revision == self.revision
    }

    /// Applies `edit` and recomputes if the edit calls for it.
    ///
    /// Returns `None` when the edit does not change any independent input.
    pub fn apply(
        &mut self,
        edit: DealEdit,
    ) -> Option<StampedQuote> {
        let mode = self.inputs.mode;
        edit.apply_to(&mut self.inputs);
        self.revision += 1;

        if !edit.triggers_recompute(mode) {
            debug!(revision = self.revision, ?edit, "edit stored without recompute");
            return None;
        }

        Some(self.recompute())
    }

    /// Recomputes from the current inputs without changing the revision.
    pub fn recompute(&mut self) -> StampedQuote {
        let quote = self.coordinator.recompute(&mut self.inputs);
        debug!(
            revision = self.revision,
            mode = self.inputs.mode.as_str(),
            status = ?quote.solver.status,
            "recomputed deal"
        );

        StampedQuote {
            revision: self.revision,
            quote,
        }
    }

    /// Consumes the session and returns its inputs.
    pub fn into_inputs(self) -> DealInputs {
        self.inputs
    }
}
