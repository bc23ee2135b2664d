use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use deal_core::DealCalculator;
use deal_core::calculations::{CalculatorConfig, SolverLimits};
use deal_data::DealScenarioLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Quote every deal in a scenarios CSV and write the results as CSV.
///
/// The CSV file should have the following columns:
/// - id: Scenario name, echoed into the results
/// - sale_type: retail or wholesale
/// - sales_price, doc_fee, title_fee, down_payment: Amounts (fees and down may be empty)
/// - apr: Annual percentage rate (e.g., 19.99)
/// - frequency: weekly, biweekly, semimonthly or monthly
/// - mode: term or payment
/// - term_months: Loan term, read in term mode
/// - payment_amount: Payment per period, read in payment mode
#[derive(Parser, Debug)]
#[command(name = "deal-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing deal scenarios
    #[arg(short, long)]
    file: PathBuf,

    /// Where to write the results CSV (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum payment periods any schedule may run
    #[arg(long, default_value_t = SolverLimits::default().max_periods)]
    max_periods: u32,

    /// Maximum binary-search steps when solving for a payment
    #[arg(long, default_value_t = SolverLimits::default().max_search_iterations)]
    max_search_iterations: u32,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    // Results may go to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let calculator = DealCalculator::new(CalculatorConfig {
        limits: SolverLimits {
            max_periods: args.max_periods,
            max_search_iterations: args.max_search_iterations,
        },
        ..CalculatorConfig::default()
    })
    .context("Invalid solver limits")?;

    info!("Loading deal scenarios from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let scenarios = DealScenarioLoader::load(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    info!("Parsed {} scenarios from CSV", scenarios.len());

    let results = DealScenarioLoader::quote_all(&calculator, &scenarios);
    let infeasible = results.iter().filter(|r| r.status == "infeasible").count();

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    DealScenarioLoader::write_results(writer, &results).context("Failed to write results")?;

    info!(
        "Quoted {} scenarios ({} infeasible).",
        results.len(),
        infeasible
    );

    Ok(())
}
