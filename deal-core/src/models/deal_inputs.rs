use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Money, PaymentFrequency, SaleType};

/// Which side of the deal the salesperson is driving.
///
/// The mode names the *independent* field: `ByTerm` treats `term_months`
/// as the truth and derives the payment, `ByPayment` does the reverse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealMode {
    #[default]
    ByTerm,
    ByPayment,
}

impl DealMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByTerm => "term",
            Self::ByPayment => "payment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "term" | "byterm" => Some(Self::ByTerm),
            "payment" | "bypayment" => Some(Self::ByPayment),
            _ => None,
        }
    }
}

/// A snapshot of everything the salesperson has entered for one deal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealInputs {
    pub sale_type: SaleType,
    pub sales_price: Money,
    /// Doc / notary fee.
    pub doc_fee: Money,
    /// Title / license fee.
    pub title_fee: Money,
    pub down_payment: Money,
    /// Annual percentage rate, e.g. `19.99` for 19.99%.
    pub apr: Decimal,
    pub frequency: PaymentFrequency,
    pub mode: DealMode,
    /// Authoritative only while `mode` is [`DealMode::ByTerm`].
    pub term_months: u32,
    /// Authoritative only while `mode` is [`DealMode::ByPayment`].
    pub payment_amount: Money,
}
