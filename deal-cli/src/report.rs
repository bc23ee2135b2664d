//! Rendering a quote for the terminal.

use deal_core::{DealInputs, DealMode, DealQuote, SaleType, Solved, SolverStatus};
use serde::Serialize;

use crate::utils::{format_apr, format_currency};

/// What the salesperson should do next, or `None` when the quote is complete.
///
/// Missing input and an impossible schedule read differently on purpose: the
/// first is a normal step while filling in the form, the second means the
/// numbers cannot work.
pub fn status_message(
    mode: DealMode,
    status: SolverStatus,
) -> Option<&'static str> {
    match (status, mode) {
        (SolverStatus::Solved, _) => None,
        (SolverStatus::NeedsInput, DealMode::ByTerm) => {
            Some("Enter a sales price above the down payment and a loan term to compute the payment.")
        }
        (SolverStatus::NeedsInput, DealMode::ByPayment) => {
            Some("Enter a sales price above the down payment and a payment amount to compute the term.")
        }
        (SolverStatus::Infeasible, DealMode::ByTerm) => {
            Some("Cannot compute a valid schedule: the term is too long or the rate too high.")
        }
        (SolverStatus::Infeasible, DealMode::ByPayment) => Some(
            "Cannot compute a valid schedule: the payment does not pay the loan off within the allowed term.",
        ),
    }
}

/// The JSON document printed by `--format json`.
#[derive(Debug, Serialize)]
pub struct QuoteReport<'a> {
    pub inputs: &'a DealInputs,
    pub quote: &'a DealQuote,
    pub feasible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<'a> QuoteReport<'a> {
    pub fn new(
        inputs: &'a DealInputs,
        quote: &'a DealQuote,
    ) -> Self {
        Self {
            inputs,
            quote,
            feasible: quote.solver.feasible(),
            message: status_message(inputs.mode, quote.solver.status),
        }
    }
}

pub fn render_json(
    inputs: &DealInputs,
    quote: &DealQuote,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&QuoteReport::new(inputs, quote))
}

fn push_line(
    out: &mut String,
    label: &str,
    value: &str,
) {
    out.push_str(&format!("{:<18}{:>16}\n", format!("{label}:"), value));
}

/// Renders the quote as an aligned worksheet.
///
/// `inputs` must be the post-recompute inputs, so the side that was not
/// solved for shows the value the salesperson entered.
pub fn render_text(
    inputs: &DealInputs,
    quote: &DealQuote,
) -> String {
    let mut out = String::new();
    let sale_type = match inputs.sale_type {
        SaleType::Retail => "Retail",
        SaleType::Wholesale => "Wholesale",
    };

    push_line(&mut out, "Sale type", sale_type);
    push_line(&mut out, "Sales price", &format_currency(inputs.sales_price));
    push_line(&mut out, "Doc fee", &format_currency(inputs.doc_fee));
    push_line(&mut out, "Title fee", &format_currency(inputs.title_fee));
    push_line(&mut out, "State tax", &format_currency(quote.taxes.state_tax));
    push_line(&mut out, "Local tax", &format_currency(quote.taxes.local_tax));
    push_line(&mut out, "B&O tax", &format_currency(quote.taxes.business_tax));
    push_line(&mut out, "Total price", &format_currency(quote.totals.total_price));
    push_line(&mut out, "Down payment", &format_currency(inputs.down_payment));
    push_line(&mut out, "Amount financed", &format_currency(quote.totals.amount_financed));
    out.push('\n');

    push_line(&mut out, "APR", &format_apr(inputs.apr));
    push_line(&mut out, "Frequency", inputs.frequency.label());

    let (term, payment) = match quote.solver.solved {
        Solved::Payment(payment) => (inputs.term_months, payment),
        Solved::TermMonths(months) => (months, inputs.payment_amount),
    };
    push_line(&mut out, "Term", &format!("{term} months"));
    push_line(&mut out, "Payment", &format_currency(payment));
    push_line(&mut out, "Finance charge", &format_currency(quote.totals.finance_charge));
    push_line(&mut out, "Balance due", &format_currency(quote.totals.balance_due));

    if let Some(message) = status_message(inputs.mode, quote.solver.status) {
        out.push('\n');
        out.push_str(message);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use deal_core::{Money, PaymentFrequency, compute_deal};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn concrete_inputs() -> DealInputs {
        DealInputs {
            sale_type: SaleType::Retail,
            sales_price: Money::from_major_minor(20000, 0),
            doc_fee: Money::from_major_minor(299, 0),
            title_fee: Money::from_major_minor(139, 50),
            down_payment: Money::from_major_minor(2000, 0),
            apr: dec!(19.99),
            frequency: PaymentFrequency::Monthly,
            mode: DealMode::ByTerm,
            term_months: 60,
            payment_amount: Money::ZERO,
        }
    }

    #[test]
    fn solved_quote_has_no_message() {
        assert_eq!(status_message(DealMode::ByTerm, SolverStatus::Solved), None);
        assert_eq!(status_message(DealMode::ByPayment, SolverStatus::Solved), None);
    }

    #[test]
    fn needs_input_and_infeasible_read_differently() {
        for mode in [DealMode::ByTerm, DealMode::ByPayment] {
            let needs_input = status_message(mode, SolverStatus::NeedsInput).unwrap();
            let infeasible = status_message(mode, SolverStatus::Infeasible).unwrap();

            assert!(needs_input.starts_with("Enter"));
            assert!(infeasible.starts_with("Cannot compute a valid schedule"));
        }
    }

    #[test]
    fn text_report_shows_formatted_totals() {
        let inputs = concrete_inputs();
        let quote = compute_deal(&inputs);

        let text = render_text(&inputs, &quote);

        assert!(text.contains("Total price:            $22,012.60"), "{text}");
        assert!(text.contains("Amount financed:        $20,012.60"), "{text}");
        assert!(text.contains("Payment:                   $530.10"), "{text}");
        assert!(text.contains("Term:                    60 months"), "{text}");
        assert!(text.contains("APR:                        19.99%"), "{text}");
        assert!(!text.contains("Cannot"), "{text}");
    }

    #[test]
    fn text_report_explains_an_infeasible_payment() {
        let inputs = DealInputs {
            mode: DealMode::ByPayment,
            payment_amount: Money::CENT,
            ..concrete_inputs()
        };
        let quote = compute_deal(&inputs);

        let text = render_text(&inputs, &quote);

        assert!(text.contains("Payment:                     $0.01"), "{text}");
        assert!(text.contains("Cannot compute a valid schedule"), "{text}");
    }

    #[test]
    fn json_report_carries_amounts_as_decimal_strings() {
        let inputs = concrete_inputs();
        let quote = compute_deal(&inputs);

        let json = render_json(&inputs, &quote).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["quote"]["totals"]["total_price"], "22012.60");
        assert_eq!(value["quote"]["solver"]["solved"]["Payment"], "530.10");
        assert_eq!(value["quote"]["solver"]["status"], "Solved");
        assert_eq!(value["feasible"], true);
        assert!(value.get("message").is_none());
    }

    #[test]
    fn json_report_includes_message_when_unsolved() {
        let inputs = DealInputs {
            term_months: 0,
            ..concrete_inputs()
        };
        let quote = compute_deal(&inputs);

        let value: serde_json::Value =
            serde_json::from_str(&render_json(&inputs, &quote).unwrap()).unwrap();

        assert_eq!(value["feasible"], true);
        assert_eq!(value["quote"]["solver"]["status"], "NeedsInput");
        assert!(value["message"].as_str().unwrap().starts_with("Enter"));
    }
}
