//! Term from payment.
//!
//! With the payment fixed, the term is read off a single forward replay:
//! the number of periods needed to reach zero, converted to months and
//! rounded up.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::{AmortizationSimulator, SolverLimits};
use crate::{DealMode, Money, PaymentFrequency, SolverResult};

/// Finds how long a fixed payment takes to retire a principal.
#[derive(Debug, Clone)]
pub struct TermSolver<'a> {
    limits: &'a SolverLimits,
}

impl<'a> TermSolver<'a> {
    pub fn new(limits: &'a SolverLimits) -> Self {
        Self { limits }
    }

    /// Solves for the term in months at `payment` per period.
    ///
    /// Returns [`SolverStatus::Infeasible`](crate::SolverStatus::Infeasible)
    /// when the payment does not cover a period's interest or the balance is
    /// still open after the period limit.
    pub fn solve(
        &self,
        principal: Money,
        apr: Decimal,
        payment: Money,
        frequency: PaymentFrequency,
    ) -> SolverResult {
        if principal.is_negative() || apr.is_sign_negative() {
            return SolverResult::needs_input(DealMode::ByPayment);
        }
        if principal <= Money::CENT {
            return SolverResult::term_months(0, Money::ZERO);
        }
        if !payment.is_positive() {
            return SolverResult::needs_input(DealMode::ByPayment);
        }

        let simulator = AmortizationSimulator::new(apr, frequency);
        let schedule = simulator.simulate(principal, payment, self.limits.max_periods);

        if !schedule.fully_paid {
            if schedule.stalled {
                warn!(%principal, %payment, %apr, "payment does not cover interest");
            } else {
                warn!(
                    %principal,
                    %payment,
                    max_periods = self.limits.max_periods,
                    remaining = %schedule.final_balance,
                    "payment does not retire the loan within the period limit"
                );
            }
            return SolverResult::infeasible(DealMode::ByPayment);
        }

        let term_months = frequency.months_for_periods(schedule.periods_used);
        debug!(
            %principal,
            %payment,
            periods = schedule.periods_used,
            term_months,
            finance_charge = %schedule.total_interest,
            "solved term"
        );

        SolverResult::term_months(term_months, schedule.total_interest)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::SolverStatus;

    fn dollars(major: i64, minor: i64) -> Money {
        Money::from_major_minor(major, minor)
    }

    fn solve(
        principal: Money,
        apr: Decimal,
        payment: Money,
        frequency: PaymentFrequency,
    ) -> SolverResult {
        let limits = SolverLimits::default();
        TermSolver::new(&limits).solve(principal, apr, payment, frequency)
    }

    #[test]
    fn solves_concrete_monthly_deal() {
        let result = solve(dollars(20012, 60), dec!(19.99), dollars(530, 10), PaymentFrequency::Monthly);

        assert_eq!(result, SolverResult::term_months(60, dollars(11792, 83)));
    }

    #[test]
    fn smaller_payment_stretches_the_term() {
        let result = solve(dollars(20012, 60), dec!(19.99), dollars(500, 0), PaymentFrequency::Monthly);

        assert_eq!(result, SolverResult::term_months(67, dollars(13244, 38)));
    }

    #[test]
    fn weekly_periods_round_up_to_whole_months() {
        // 34 weekly payments at 0% cover 7.85 months
        let result = solve(dollars(10000, 0), Decimal::ZERO, dollars(300, 0), PaymentFrequency::Weekly);

        assert_eq!(result, SolverResult::term_months(8, Money::ZERO));
    }

    #[test]
    fn long_schedule_inside_period_limit_is_solved() {
        // One cent above the monthly interest: 644 periods
        let result = solve(dollars(20012, 60), dec!(19.99), dollars(333, 38), PaymentFrequency::Monthly);

        assert_eq!(result.solved_term_months(), Some(644));
        assert!(result.is_solved());
    }

    #[test]
    fn one_cent_payment_is_infeasible() {
        let result = solve(dollars(10000, 0), dec!(19.99), Money::CENT, PaymentFrequency::Monthly);

        assert_eq!(result, SolverResult::infeasible(DealMode::ByPayment));
        assert!(!result.feasible());
    }

    #[test]
    fn payment_equal_to_interest_is_infeasible() {
        let result = solve(dollars(20012, 60), dec!(19.99), dollars(333, 37), PaymentFrequency::Monthly);

        assert_eq!(result.status, SolverStatus::Infeasible);
    }

    #[test]
    fn schedule_past_period_limit_is_infeasible() {
        let limits = SolverLimits {
            max_periods: 60,
            ..SolverLimits::default()
        };

        let result = TermSolver::new(&limits).solve(
            dollars(20012, 60),
            dec!(19.99),
            dollars(500, 0),
            PaymentFrequency::Monthly,
        );

        assert_eq!(result.status, SolverStatus::Infeasible);
        assert_eq!(result.finance_charge, Money::ZERO);
    }

    #[test]
    fn zero_principal_has_zero_term() {
        let result = solve(Money::ZERO, dec!(19.99), Money::ZERO, PaymentFrequency::Monthly);

        assert_eq!(result, SolverResult::term_months(0, Money::ZERO));
    }

    #[test]
    fn zero_payment_needs_input() {
        let result = solve(dollars(10000, 0), dec!(19.99), Money::ZERO, PaymentFrequency::Monthly);

        assert_eq!(result.status, SolverStatus::NeedsInput);
        assert!(result.feasible());
    }

    #[test]
    fn negative_principal_needs_input() {
        let result = solve(dollars(-1, 0), dec!(19.99), dollars(100, 0), PaymentFrequency::Monthly);

        assert_eq!(result, SolverResult::needs_input(DealMode::ByPayment));
    }
}
