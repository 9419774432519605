//! Logging setup for the `invoice-calc` binary.
//!
//! Log records go to stderr so that stdout carries only the command output,
//! and optionally to an append-mode log file.

use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// `<local timestamp> <LEVEL> <file:line> <fields>`
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
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
        let ansi = writer.has_ansi_escapes();

        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        if ansi {
            write!(writer, "\x1b[2m{timestamp}\x1b[0m ")?;
        } else {
            write!(writer, "{timestamp} ")?;
        }

        let (pre, post) = match (ansi, *meta.level()) {
            (false, _) => ("", ""),
            (true, Level::ERROR) => ("\x1b[1;31m", "\x1b[0m"),
            (true, Level::WARN) => ("\x1b[1;33m", "\x1b[0m"),
            (true, Level::INFO) => ("\x1b[1;32m", "\x1b[0m"),
            (true, Level::DEBUG) => ("\x1b[1;34m", "\x1b[0m"),
            (true, Level::TRACE) => ("\x1b[1;35m", "\x1b[0m"),
        };
        write!(writer, "{}{:>5}{} ", pre, meta.level(), post)?;

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file.rsplit(['/', '\\']).next().unwrap_or(file);
            write!(writer, "{file}:{line} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn make_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber. Call once at startup.
///
/// * Level comes from `RUST_LOG`, falling back to `default_filter`.
/// * Stderr output is colored only when attached to a terminal.
/// * When `log_file` is given, records are also appended there without
///   color. The directory must already exist.
pub fn init_logging(
    default_filter: &str,
    log_file: Option<&Path>,
) -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    let file_layer = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LocalFmt)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(make_filter(default_filter))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")?;

    Ok(())
}
