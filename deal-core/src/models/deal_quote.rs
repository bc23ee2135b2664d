use serde::{Deserialize, Serialize};

use super::{DealMode, Money};

/// Tax line items for a sale. All zero for wholesale deals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub state_tax: Money,
    pub local_tax: Money,
    pub business_tax: Money,
}

impl TaxBreakdown {
    pub fn total(&self) -> Money {
        self.state_tax + self.local_tax + self.business_tax
    }
}

/// Totals derived from the inputs, the taxes, and the solved schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAmounts {
    pub total_price: Money,
    pub amount_financed: Money,
    pub finance_charge: Money,
    pub balance_due: Money,
}

/// Outcome class of a solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverStatus {
    /// A schedule was found.
    Solved,
    /// Some required input is zero or negative; nothing to compute yet.
    NeedsInput,
    /// No schedule fits within the payment or period bounds.
    Infeasible,
}

impl SolverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solved => "solved",
            Self::NeedsInput => "needs_input",
            Self::Infeasible => "infeasible",
        }
    }
}

/// The field a solver produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Solved {
    /// Payment per period, derived from a fixed term.
    Payment(Money),
    /// Loan term in months, derived from a fixed payment.
    TermMonths(u32),
}

/// What the payment or term solver returned.
///
/// Unless the status is [`SolverStatus::Solved`], the solved value and the
/// finance charge are zero rather than a partial figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverResult {
    pub solved: Solved,
    pub status: SolverStatus,
    /// Total interest paid over the solved schedule.
    pub finance_charge: Money,
}

impl SolverResult {
    pub fn payment(payment: Money, finance_charge: Money) -> Self {
        Self {
            solved: Solved::Payment(payment),
            status: SolverStatus::Solved,
            finance_charge,
        }
    }

    pub fn term_months(term_months: u32, finance_charge: Money) -> Self {
        Self {
            solved: Solved::TermMonths(term_months),
            status: SolverStatus::Solved,
            finance_charge,
        }
    }

    pub fn needs_input(mode: DealMode) -> Self {
        Self::zeroed(mode, SolverStatus::NeedsInput)
    }

    pub fn infeasible(mode: DealMode) -> Self {
        Self::zeroed(mode, SolverStatus::Infeasible)
    }

    fn zeroed(
        mode: DealMode,
        status: SolverStatus,
    ) -> Self {
        let solved = match mode {
            DealMode::ByTerm => Solved::Payment(Money::ZERO),
            DealMode::ByPayment => Solved::TermMonths(0),
        };
        Self {
            solved,
            status,
            finance_charge: Money::ZERO,
        }
    }

    /// False only when the schedule could not be amortized within bounds.
    pub fn feasible(&self) -> bool {
        self.status != SolverStatus::Infeasible
    }

    pub fn is_solved(&self) -> bool {
        self.status == SolverStatus::Solved
    }

    pub fn solved_payment(&self) -> Option<Money> {
        match self.solved {
            Solved::Payment(payment) => Some(payment),
            Solved::TermMonths(_) => None,
        }
    }

    pub fn solved_term_months(&self) -> Option<u32> {
        match self.solved {
            Solved::TermMonths(months) => Some(months),
            Solved::Payment(_) => None,
        }
    }
}

/// Everything `compute_deal` returns for one snapshot of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealQuote {
    pub taxes: TaxBreakdown,
    pub totals: DerivedAmounts,
    pub solver: SolverResult,
}
