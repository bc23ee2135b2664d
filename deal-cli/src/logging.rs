//! Diagnostics for `deal-desk`.
//!
//! Quotes are printed to stdout, so every log line goes to stderr. The filter
//! comes from `RUST_LOG` (default `warn`) and can be replaced once at startup
//! by `--log-level`, which swaps it through a reload handle.

use std::io::{self, IsTerminal};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

const DEFAULT_FILTER: &str = "warn";

const TIME_FORMAT: &str = "%H:%M:%S%.3f";

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// One line per event: `14:02:11.530  WARN deal_core::calculations: message key=value`.
struct DeskFormat;

/// SGR color for each level.
fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "1;31",
        Level::WARN => "1;33",
        Level::INFO => "1;32",
        Level::DEBUG => "1;34",
        Level::TRACE => "1;35",
    }
}

impl<S, N> FormatEvent<S, N> for DeskFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let now = Local::now().format(TIME_FORMAT);

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{now}\x1b[0m \x1b[{}m{:>5}\x1b[0m \x1b[36m{}:\x1b[0m ",
                level_color(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{now} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the stderr subscriber. Later calls are no-ops.
pub fn init_logging() {
    let (filter, handle) = reload::Layer::new(env_filter());

    let stderr = tracing_subscriber::fmt::layer()
        .event_format(DeskFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    if tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .try_init()
        .is_ok()
    {
        let _ = FILTER_HANDLE.set(handle);
    }
}

/// Replaces the active filter with `directives`, e.g. `debug` or
/// `deal_core::calculations=trace,warn`.
pub fn set_log_level(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directives)
        .with_context(|| format!("invalid log filter '{directives}'"))?;

    let handle = FILTER_HANDLE
        .get()
        .context("logging has not been initialized")?;
    handle.reload(filter).context("failed to swap log filter")
}
