//! Integration tests that quote the shipped scenarios fixture end to end.

use deal_core::{DealCalculator, DealMode, Money, PaymentFrequency, SaleType};
use deal_data::{DealResultRecord, DealScenarioLoader};
use pretty_assertions::assert_eq;

const TEST_CSV: &str = include_str!("../test-data/deals.csv");

fn dollars(major: i64, minor: i64) -> Money {
    Money::from_major_minor(major, minor)
}

fn quote_fixture() -> Vec<DealResultRecord> {
    let scenarios = DealScenarioLoader::load(TEST_CSV.as_bytes()).expect("Failed to load fixture");
    DealScenarioLoader::quote_all(&DealCalculator::default(), &scenarios)
}

fn result<'a>(results: &'a [DealResultRecord], id: &str) -> &'a DealResultRecord {
    results
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| panic!("no result for {id}"))
}

#[test]
fn test_load_fixture_keeps_file_order() {
    let scenarios = DealScenarioLoader::load(TEST_CSV.as_bytes()).expect("Failed to load fixture");

    let ids: Vec<_> = scenarios.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "retail-60",
            "retail-60-weekly",
            "retail-by-payment",
            "wholesale-cash",
            "zero-apr",
            "one-cent",
            "no-term",
        ]
    );
    assert_eq!(scenarios[1].inputs.frequency, PaymentFrequency::Weekly);
    assert_eq!(scenarios[2].inputs.mode, DealMode::ByPayment);
    assert_eq!(scenarios[3].inputs.sale_type, SaleType::Wholesale);
}

#[test]
fn test_retail_monthly_scenario() {
    let results = quote_fixture();
    let r = result(&results, "retail-60");

    assert_eq!(r.status, "solved");
    assert_eq!(r.state_tax, dollars(1469, 20));
    assert_eq!(r.local_tax, dollars(44, 0));
    assert_eq!(r.business_tax, dollars(60, 90));
    assert_eq!(r.total_price, dollars(22012, 60));
    assert_eq!(r.amount_financed, dollars(20012, 60));
    assert_eq!(r.payment_amount, dollars(530, 10));
    assert_eq!(r.finance_charge, dollars(11792, 83));
    assert_eq!(r.balance_due, dollars(31805, 43));
}

#[test]
fn test_retail_weekly_scenario() {
    let results = quote_fixture();
    let r = result(&results, "retail-60-weekly");

    assert_eq!(r.payment_amount, dollars(121, 74));
    assert_eq!(r.finance_charge, dollars(11636, 70));
}

#[test]
fn test_payment_driven_scenario() {
    let results = quote_fixture();
    let r = result(&results, "retail-by-payment");

    assert_eq!(r.mode, "payment");
    assert_eq!(r.term_months, 67);
    assert_eq!(r.payment_amount, dollars(500, 0));
    assert_eq!(r.finance_charge, dollars(13244, 38));
}

#[test]
fn test_cash_deal_finances_nothing() {
    let results = quote_fixture();
    let r = result(&results, "wholesale-cash");

    assert_eq!(r.status, "solved");
    assert_eq!(r.amount_financed, Money::ZERO);
    assert_eq!(r.payment_amount, Money::ZERO);
    assert_eq!(r.balance_due, Money::ZERO);
}

#[test]
fn test_zero_apr_scenario() {
    let results = quote_fixture();
    let r = result(&results, "zero-apr");

    assert_eq!(r.payment_amount, dollars(416, 67));
    assert_eq!(r.finance_charge, Money::ZERO);
}

#[test]
fn test_unworkable_scenarios_report_status() {
    let results = quote_fixture();

    let one_cent = result(&results, "one-cent");
    assert_eq!(one_cent.status, "infeasible");
    assert_eq!(one_cent.term_months, 0);
    assert_eq!(one_cent.balance_due, one_cent.amount_financed);

    let no_term = result(&results, "no-term");
    assert_eq!(no_term.status, "needs_input");
    assert_eq!(no_term.payment_amount, Money::ZERO);
}

#[test]
fn test_results_csv_has_one_row_per_scenario() {
    let results = quote_fixture();

    let mut out = Vec::new();
    DealScenarioLoader::write_results(&mut out, &results).expect("Failed to write results");
    let text = String::from_utf8(out).expect("utf-8");

    assert_eq!(text.lines().count(), results.len() + 1);
    assert!(text.contains("retail-60,term,solved,530.10,60,1469.20,44.00,60.90,22012.60,20012.60,11792.83,31805.43"));
}
