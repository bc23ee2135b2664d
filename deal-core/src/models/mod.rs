mod deal_inputs;
mod deal_quote;
mod money;
mod payment_frequency;
mod sale_type;

pub use deal_inputs::{DealInputs, DealMode};
pub use deal_quote::{DealQuote, DerivedAmounts, Solved, SolverResult, SolverStatus, TaxBreakdown};
pub use money::{MAX_INPUT_DOLLARS, Money, MoneyError};
pub use payment_frequency::{DayCount, PaymentFrequency};
pub use sale_type::SaleType;
