//! CSV scenarios in, CSV quotes out.
//!
//! ## Scenario columns
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column           | Required | Type    | Notes                                     |
//! |------------------|----------|---------|-------------------------------------------|
//! | `id`             | yes      | string  | Echoed into the results                   |
//! | `sale_type`      | yes      | string  | `retail`/`r` or `wholesale`/`w`           |
//! | `sales_price`    | yes      | decimal | e.g. `20000.00`                           |
//! | `doc_fee`        | no       | decimal | Empty cell means zero                     |
//! | `title_fee`      | no       | decimal | Empty cell means zero                     |
//! | `down_payment`   | no       | decimal | Empty cell means zero                     |
//! | `apr`            | yes      | decimal | Percentage, e.g. `19.99`                  |
//! | `frequency`      | yes      | string  | `weekly`, `biweekly`, `semimonthly`, `monthly` |
//! | `mode`           | yes      | string  | `term` or `payment`                       |
//! | `term_months`    | no       | integer | Read only when `mode` is `term`           |
//! | `payment_amount` | no       | decimal | Read only when `mode` is `payment`        |

use std::io::{Read, Write};

use deal_core::{
    DealCalculator, DealInputs, DealMode, DealQuote, Money, MoneyError, PaymentFrequency,
    SaleType, Solved,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when loading deal scenarios.
#[derive(Debug, Error)]
pub enum DealScenarioLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unrecognised sale type '{value}' on row {row}")]
    InvalidSaleType { value: String, row: usize },

    #[error("unrecognised payment frequency '{value}' on row {row}")]
    InvalidFrequency { value: String, row: usize },

    #[error("unrecognised mode '{value}' on row {row}")]
    InvalidMode { value: String, row: usize },

    #[error("invalid {field} on row {row}: {source}")]
    InvalidAmount {
        field: &'static str,
        row: usize,
        #[source]
        source: MoneyError,
    },

    #[error("failed to write results: {0}")]
    Write(String),
}

impl From<csv::Error> for DealScenarioLoaderError {
    fn from(err: csv::Error) -> Self {
        DealScenarioLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the scenarios CSV, exactly as written.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DealScenarioRecord {
    pub id: String,
    pub sale_type: String,
    pub sales_price: Decimal,
    pub doc_fee: Option<Decimal>,
    pub title_fee: Option<Decimal>,
    pub down_payment: Option<Decimal>,
    pub apr: Decimal,
    pub frequency: String,
    pub mode: String,
    pub term_months: Option<u32>,
    pub payment_amount: Option<Decimal>,
}

impl DealScenarioRecord {
    /// Converts the row into engine inputs. `row` is 1-based for messages.
    pub fn to_inputs(
        &self,
        row: usize,
    ) -> Result<DealInputs, DealScenarioLoaderError> {
        let sale_type = SaleType::parse(&self.sale_type).ok_or_else(|| {
            DealScenarioLoaderError::InvalidSaleType {
                value: self.sale_type.clone(),
                row,
            }
        })?;
        let frequency = PaymentFrequency::parse(&self.frequency).ok_or_else(|| {
            DealScenarioLoaderError::InvalidFrequency {
                value: self.frequency.clone(),
                row,
            }
        })?;
        let mode =
            DealMode::parse(&self.mode).ok_or_else(|| DealScenarioLoaderError::InvalidMode {
                value: self.mode.clone(),
                row,
            })?;

        Ok(DealInputs {
            sale_type,
            sales_price: money("sales_price", Some(self.sales_price), row)?,
            doc_fee: money("doc_fee", self.doc_fee, row)?,
            title_fee: money("title_fee", self.title_fee, row)?,
            down_payment: money("down_payment", self.down_payment, row)?,
            apr: self.apr,
            frequency,
            mode,
            term_months: self.term_months.unwrap_or_default(),
            payment_amount: money("payment_amount", self.payment_amount, row)?,
        })
    }
}

fn money(
    field: &'static str,
    value: Option<Decimal>,
    row: usize,
) -> Result<Money, DealScenarioLoaderError> {
    value
        .map(Money::from_decimal)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(|source| DealScenarioLoaderError::InvalidAmount { field, row, source })
}

/// A parsed scenario ready to quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealScenario {
    pub id: String,
    pub inputs: DealInputs,
}

/// One row of the results CSV.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DealResultRecord {
    pub id: String,
    pub mode: &'static str,
    pub status: &'static str,
    pub payment_amount: Money,
    pub term_months: u32,
    pub state_tax: Money,
    pub local_tax: Money,
    pub business_tax: Money,
    pub total_price: Money,
    pub amount_financed: Money,
    pub finance_charge: Money,
    pub balance_due: Money,
}

impl DealResultRecord {
    /// Flattens a quote, filling the independent field from the inputs.
    pub fn new(
        scenario: &DealScenario,
        quote: &DealQuote,
    ) -> Self {
        let (payment_amount, term_months) = match quote.solver.solved {
            Solved::Payment(payment) => (payment, scenario.inputs.term_months),
            Solved::TermMonths(months) => (scenario.inputs.payment_amount, months),
        };

        Self {
            id: scenario.id.clone(),
            mode: scenario.inputs.mode.as_str(),
            status: quote.solver.status.as_str(),
            payment_amount,
            term_months,
            state_tax: quote.taxes.state_tax,
            local_tax: quote.taxes.local_tax,
            business_tax: quote.taxes.business_tax,
            total_price: quote.totals.total_price,
            amount_financed: quote.totals.amount_financed,
            finance_charge: quote.totals.finance_charge,
            balance_due: quote.totals.balance_due,
        }
    }
}

/// Loader for deal scenarios from CSV files.
pub struct DealScenarioLoader;

impl DealScenarioLoader {
    /// Parse scenario records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice. Whitespace around cells is ignored.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<DealScenarioRecord>, DealScenarioLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: DealScenarioRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and convert every row, stopping at the first invalid one.
    pub fn load<R: Read>(reader: R) -> Result<Vec<DealScenario>, DealScenarioLoaderError> {
        Self::parse(reader)?
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                let inputs = record.to_inputs(idx + 1)?;
                Ok(DealScenario {
                    id: record.id,
                    inputs,
                })
            })
            .collect()
    }

    /// Quote every scenario with `calculator`, in file order.
    pub fn quote_all(
        calculator: &DealCalculator,
        scenarios: &[DealScenario],
    ) -> Vec<DealResultRecord> {
        scenarios
            .iter()
            .map(|scenario| {
                let quote = calculator.calculate(&scenario.inputs);
                if !quote.solver.feasible() {
                    warn!(id = %scenario.id, "scenario has no feasible schedule");
                }
                debug!(id = %scenario.id, status = quote.solver.status.as_str(), "quoted scenario");
                DealResultRecord::new(scenario, &quote)
            })
            .collect()
    }

    /// Write result rows, with a header, to `writer`.
    pub fn write_results<W: Write>(
        writer: W,
        results: &[DealResultRecord],
    ) -> Result<(), DealScenarioLoaderError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for result in results {
            csv_writer.serialize(result)?;
        }
        csv_writer
            .flush()
            .map_err(|e| DealScenarioLoaderError::Write(e.to_string()))
    }
}
