use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use deal_core::{
    DealCalculator, DealInputs, DealMode, DealSession, ModeCoordinator, Money, PaymentFrequency,
    SaleType,
};
use deal_cli::logging;
use deal_cli::settings::Settings;
use deal_cli::utils::{parse_apr, parse_frequency, parse_money, parse_sale_type};
use deal_cli::{render_json, render_text};
use rust_decimal::Decimal;
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Dealership deal desk.
///
/// Computes taxes, totals, and either the payment for a given term or the
/// term for a given payment, and prints the structured deal.
#[derive(Debug, Parser)]
#[command(name = "deal-desk", version, about)]
#[command(group(ArgGroup::new("solve_for").required(true).args(["term", "payment"])))]
struct Cli {
    /// Vehicle sales price, e.g. `20000` or `$20,000.00`.
    #[arg(long, value_parser = parse_money)]
    price: Money,

    /// Doc / notary fee. Defaults to the settings file value.
    #[arg(long, value_parser = parse_money)]
    doc_fee: Option<Money>,

    /// Title / license fee. Defaults to the settings file value.
    #[arg(long, value_parser = parse_money)]
    title_fee: Option<Money>,

    /// Down payment.
    #[arg(long, value_parser = parse_money, default_value = "0")]
    down: Money,

    /// Annual percentage rate, e.g. `19.99` or `19.99%`.
    #[arg(long, value_parser = parse_apr)]
    apr: Decimal,

    /// Payment frequency: weekly, biweekly, semimonthly or monthly.
    #[arg(long, value_parser = parse_frequency, default_value = "monthly")]
    frequency: PaymentFrequency,

    /// Sale type: retail or wholesale. Wholesale deals are untaxed.
    #[arg(long, value_parser = parse_sale_type, default_value = "retail")]
    sale_type: SaleType,

    /// Loan term in months; the payment is solved for.
    #[arg(long)]
    term: Option<u32>,

    /// Payment per period; the term is solved for.
    #[arg(long, value_parser = parse_money)]
    payment: Option<Money>,

    /// TOML settings file with fee defaults and calculator constants.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log filter, e.g. `debug` or `deal_core=trace`. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn deal_inputs(
        &self,
        settings: &Settings,
    ) -> DealInputs {
        let mode = if self.payment.is_some() {
            DealMode::ByPayment
        } else {
            DealMode::ByTerm
        };

        DealInputs {
            sale_type: self.sale_type,
            sales_price: self.price,
            doc_fee: self.doc_fee.unwrap_or(settings.fees.doc_fee),
            title_fee: self.title_fee.unwrap_or(settings.fees.title_fee),
            down_payment: self.down,
            apr: self.apr,
            frequency: self.frequency,
            mode,
            term_months: self.term.unwrap_or_default(),
            payment_amount: self.payment.unwrap_or_default(),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }

    let settings = match &cli.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => Settings::default(),
    };

    let calculator =
        DealCalculator::new(settings.calculator.clone()).context("Invalid calculator settings")?;
    let inputs = cli.deal_inputs(&settings);
    debug!(?inputs, "parsed deal inputs");

    let mut session = DealSession::with_coordinator(ModeCoordinator::new(calculator), inputs);
    let stamped = session.recompute();
    info!(
        revision = stamped.revision,
        status = stamped.quote.solver.status.as_str(),
        "quoted deal"
    );

    let output = match cli.format {
        OutputFormat::Text => render_text(session.inputs(), &stamped.quote),
        OutputFormat::Json => {
            render_json(session.inputs(), &stamped.quote).context("Failed to render JSON")?
        }
    };
    println!("{output}");

    Ok(())
}
