//! Period-by-period loan replay.
//!
//! Each period accrues simple interest on the opening balance at a daily
//! rate of `apr / 100 / 365` over the frequency's average period length,
//! truncated to the cent, then applies the rest of the payment to principal.
//!
//! | Frequency    | Days per period | Periods per year |
//! |--------------|-----------------|------------------|
//! | Weekly       | 7               | 52               |
//! | Bi-weekly    | 14              | 26               |
//! | Semi-monthly | 365 / 24        | 24               |
//! | Monthly      | 365 / 12        | 12               |
//!
//! The replay stops when the balance is within one cent of zero, when the
//! period bound is reached, or when a payment no longer covers the interest
//! it accrues.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use deal_core::calculations::AmortizationSimulator;
//! use deal_core::{Money, PaymentFrequency};
//!
//! let simulator = AmortizationSimulator::new(dec!(12), PaymentFrequency::Monthly);
//! let outcome = simulator.simulate(Money::from_major_minor(10000, 0), Money::from_major_minor(500, 0), 1000);
//!
//! assert!(outcome.fully_paid);
//! assert_eq!(outcome.periods_used, 23);
//! assert_eq!(outcome.total_interest, Money::from_major_minor(1213, 37));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::calculations::common::scale_truncated;
use crate::{Money, PaymentFrequency};

/// Percent-to-fraction divisor times days in the year.
const PERCENT_DAYS_PER_YEAR: i64 = 100 * 365;

/// Summary of one simulated schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationOutcome {
    pub periods_used: u32,
    pub total_interest: Money,
    pub final_balance: Money,
    /// The balance reached zero (within one cent) inside the period bound.
    pub fully_paid: bool,
    /// The replay stopped because a payment did not exceed its interest.
    pub stalled: bool,
}

/// One row of the schedule. Lives only inside the simulation loop.
#[derive(Debug, Clone, Copy)]
struct AmortizationPeriod {
    index: u32,
    opening_balance: Money,
    period_interest: Money,
    principal_paid: Money,
    closing_balance: Money,
}

/// Replays a fixed-payment loan at a given APR and payment frequency.
#[derive(Debug, Clone)]
pub struct AmortizationSimulator {
    frequency: PaymentFrequency,
    /// `apr × days`, the numerator of the per-period interest factor.
    rate_numerator: Decimal,
    /// `100 × 365 × per`, its denominator.
    rate_denominator: Decimal,
}

impl AmortizationSimulator {
    /// Creates a simulator for `apr` (a percentage, e.g. `19.99`).
    pub fn new(
        apr: Decimal,
        frequency: PaymentFrequency,
    ) -> Self {
        let day_count = frequency.day_count();
        Self {
            frequency,
            rate_numerator: apr.saturating_mul(Decimal::from(day_count.days)),
            rate_denominator: Decimal::from(PERCENT_DAYS_PER_YEAR * i64::from(day_count.per)),
        }
    }

    pub fn frequency(&self) -> PaymentFrequency {
        self.frequency
    }

    /// Interest accrued on `balance` over one period, truncated to the cent.
    pub fn period_interest(
        &self,
        balance: Money,
    ) -> Money {
        scale_truncated(balance, self.rate_numerator, self.rate_denominator)
    }

    /// Replays the loan for at most `max_periods` payments of `payment`.
    pub fn simulate(
        &self,
        principal: Money,
        payment: Money,
        max_periods: u32,
    ) -> AmortizationOutcome {
        let mut balance = principal;
        let mut total_interest = Money::ZERO;
        let mut periods_used = 0;
        let mut stalled = false;

        while balance > Money::CENT && periods_used < max_periods {
            let Some(period) = self.next_period(periods_used + 1, balance, payment) else {
                stalled = true;
                break;
            };

            trace!(
                index = period.index,
                opening = %period.opening_balance,
                interest = %period.period_interest,
                principal = %period.principal_paid,
                closing = %period.closing_balance,
                "amortization period"
            );

            balance = period.closing_balance;
            total_interest += period.period_interest;
            periods_used = period.index;
        }

        let outcome = AmortizationOutcome {
            periods_used,
            total_interest,
            final_balance: balance,
            fully_paid: balance <= Money::CENT,
            stalled,
        };

        debug!(
            %principal,
            %payment,
            frequency = self.frequency.as_str(),
            periods = outcome.periods_used,
            interest = %outcome.total_interest,
            fully_paid = outcome.fully_paid,
            stalled = outcome.stalled,
            "simulated schedule"
        );

        outcome
    }

    /// Applies one payment, or returns `None` when it does not reduce principal.
    fn next_period(
        &self,
        index: u32,
        opening_balance: Money,
        payment: Money,
    ) -> Option<AmortizationPeriod> {
        let period_interest = self.period_interest(opening_balance);
        let principal_paid = payment - period_interest;
        if !principal_paid.is_positive() {
            return None;
        }

        Some(AmortizationPeriod {
            index,
            opening_balance,
            period_interest,
            principal_paid,
            closing_balance: (opening_balance - principal_paid).max(Money::ZERO),
        })
    }
}
