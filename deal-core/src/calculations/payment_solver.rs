//! Payment from term.
//!
//! With the term fixed, the payment is the smallest whole-cent amount that
//! retires the principal within `ceil(term_months / 12 × periods_per_year)`
//! periods. The search is a bisection on `[0, 2 × principal]` that keeps
//! `low` insufficient and `high` sufficient until they are one cent apart,
//! so it never settles on a payment that leaves a balance behind.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use deal_core::calculations::{PaymentSolver, SolverLimits};
//! use deal_core::{Money, PaymentFrequency};
//!
//! let limits = SolverLimits::default();
//! let result = PaymentSolver::new(&limits).solve(
//!     Money::from_major_minor(20012, 60),
//!     dec!(19.99),
//!     60,
//!     PaymentFrequency::Monthly,
//! );
//!
//! assert_eq!(result.solved_payment(), Some(Money::from_major_minor(530, 10)));
//! assert_eq!(result.finance_charge, Money::from_major_minor(11792, 83));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::{AmortizationSimulator, SolverLimits};
use crate::{DealMode, Money, PaymentFrequency, SolverResult};

/// Binary-searches the minimum payment for a fixed term.
#[derive(Debug, Clone)]
pub struct PaymentSolver<'a> {
    limits: &'a SolverLimits,
}

impl<'a> PaymentSolver<'a> {
    pub fn new(limits: &'a SolverLimits) -> Self {
        Self { limits }
    }

    /// Solves for the payment that amortizes `principal` over `term_months`.
    ///
    /// A principal within a cent of zero needs no payment. A negative
    /// principal or APR, or a zero term, returns
    /// [`SolverStatus::NeedsInput`](crate::SolverStatus::NeedsInput).
    pub fn solve(
        &self,
        principal: Money,
        apr: Decimal,
        term_months: u32,
        frequency: PaymentFrequency,
    ) -> SolverResult {
        if principal.is_negative() || apr.is_sign_negative() {
            return SolverResult::needs_input(DealMode::ByTerm);
        }
        if principal <= Money::CENT {
            return SolverResult::payment(Money::ZERO, Money::ZERO);
        }
        if term_months == 0 {
            return SolverResult::needs_input(DealMode::ByTerm);
        }

        let total_periods = frequency.periods_for_months(term_months);
        if total_periods > self.limits.max_periods {
            warn!(
                term_months,
                total_periods,
                max_periods = self.limits.max_periods,
                "term exceeds the period limit"
            );
            return SolverResult::infeasible(DealMode::ByTerm);
        }

        let simulator = AmortizationSimulator::new(apr, frequency);
        let covers = |payment: Money| simulator.simulate(principal, payment, total_periods).fully_paid;

        let mut low = Money::ZERO;
        let mut high = principal.saturating_mul(2);
        if !covers(high) {
            warn!(%principal, %apr, term_months, "no payment up to twice the principal retires the loan");
            return SolverResult::infeasible(DealMode::ByTerm);
        }

        let mut iterations = 0;
        while high - low > Money::CENT {
            if iterations >= self.limits.max_search_iterations {
                warn!(iterations, %low, %high, "payment search did not converge");
                return SolverResult::infeasible(DealMode::ByTerm);
            }

            let mid = low + Money::from_cents((high - low).cents() / 2);
            if covers(mid) {
                high = mid;
            } else {
                low = mid;
            }
            iterations += 1;
        }

        let schedule = simulator.simulate(principal, high, total_periods);
        debug!(
            %principal,
            term_months,
            iterations,
            payment = %high,
            finance_charge = %schedule.total_interest,
            "solved payment"
        );

        SolverResult::payment(high, schedule.total_interest)
    }
}
