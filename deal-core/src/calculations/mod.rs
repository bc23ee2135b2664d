//! Deal arithmetic: taxes, loan replay, and the two solvers.
//!
//! Every function here is pure and bounded. Nothing reads the clock, the
//! environment, or shared state, so a [`DealCalculator`] can be shared freely
//! between threads.

mod amortization;
pub mod common;
mod config;
mod deal;
mod payment_solver;
mod tax;
mod term_solver;

pub use amortization::{AmortizationOutcome, AmortizationSimulator};
pub use config::{
    CalculatorConfig, CalculatorConfigError, DEFAULT_MAX_PERIODS, DEFAULT_MAX_SEARCH_ITERATIONS,
    SolverLimits, TaxRates,
};
pub use deal::{DealCalculator, compute_deal};
pub use payment_solver::PaymentSolver;
pub use tax::TaxEngine;
pub use term_solver::TermSolver;
