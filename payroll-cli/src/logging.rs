//! Process-wide `tracing` setup for the `payroll` binary.
//!
//! Logging starts before the configuration file is read so that config
//! problems are themselves logged; the level and log file are applied
//! afterwards through [`set_log_level`] and [`enable_file_logging`].
//! Reports go to stdout, log records to stderr.

use std::{
    fmt,
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "info";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// One line per event: local timestamp, level, target, then fields.
struct PayrollFormat;

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Writes `value` followed by a space, wrapped in `color` when the writer
/// accepts escape codes.
fn write_colored(
    writer: &mut Writer<'_>,
    color: &str,
    value: impl fmt::Display,
) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{color}{value}{RESET} ")
    } else {
        write!(writer, "{value} ")
    }
}

impl<S, N> FormatEvent<S, N> for PayrollFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let level = meta.level();

        write_colored(&mut writer, DIM, Local::now().format(TIMESTAMP_FORMAT))?;
        write_colored(&mut writer, level_color(level), format_args!("{level:>5}"))?;
        write_colored(&mut writer, CYAN, meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Optional log file shared between the subscriber and [`enable_file_logging`].
/// Records are dropped while no file is open.
#[derive(Clone, Default)]
struct LogSink(Arc<Mutex<Option<File>>>);

impl LogSink {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(
        &self,
        file: File,
    ) {
        *self.lock() = Some(file);
    }
}

struct LogSinkGuard<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogSinkGuard<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), File::flush)
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = LogSinkGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogSinkGuard(self.lock())
    }
}

/// Handles kept after a successful [`init_logging`].
struct LoggingState {
    filter: reload::Handle<EnvFilter, Registry>,
    sink: LogSink,
}

static STATE: OnceLock<LoggingState> = OnceLock::new();

fn state() -> Result<&'static LoggingState> {
    STATE
        .get()
        .ok_or_else(|| anyhow!("logging not yet initialized"))
}

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("invalid log level '{directive}'"))
}

/// Changes the active log filter.
/// Accepts a bare level ("error", "warn", "info", "debug", "trace")
/// or any full EnvFilter directive.
pub fn set_log_level(level: &str) -> Result<()> {
    let filter = parse_filter(level)?;
    state()?
        .filter
        .reload(filter)
        .map_err(|e| anyhow!("filter reload failed: {e}"))
}

/// Starts appending log records to `path`, replacing any open log file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let state = state()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    state.sink.replace(file);
    Ok(())
}

/// Initializes logging. Call once at startup; later calls are ignored.
///
/// Stderr output is colored only when stderr is a terminal. The file layer
/// stays silent until [`enable_file_logging`]. `RUST_LOG` overrides the
/// default INFO filter.
pub fn init_logging() {
    let initial =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (filter_layer, filter) = reload::Layer::new(initial);
    let sink = LogSink::default();

    let stderr = tracing_subscriber::fmt::layer()
        .event_format(PayrollFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);
    let to_file = tracing_subscriber::fmt::layer()
        .event_format(PayrollFormat)
        .with_ansi(false)
        .with_writer(sink.clone());

    let installed = tracing_subscriber::registry()
        .with(filter_layer)
        .with(stderr)
        .with(to_file)
        .try_init();
    if installed.is_ok() {
        let _ = STATE.set(LoggingState { filter, sink });
    }
}
