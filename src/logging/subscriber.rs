//! Tracing subscriber: one line format rendered for the terminal and for the
//! per-command log file.
use std::fs;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields, format::Writer};
use tracing_subscriber::registry::LookupSpan;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path};

/// Tracing target of stage headers.
pub(super) const STAGE_TARGET: &str = "bg3_mods::stage";

/// Tracing target of dimmed hints such as the log file location.
pub(super) const HINT_TARGET: &str = "bg3_mods::hint";

/// Collects the `message` field of an event.
#[derive(Default)]
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.0);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Role of one output line, derived from level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Stage,
    Hint,
    Info,
    Debug,
    Warn,
    Error,
}

impl LineKind {
    fn of(event: &tracing::Event<'_>) -> Self {
        let metadata = event.metadata();
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, HINT_TARGET) => Self::Hint,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Prefix used in the log file, after the timestamp.
    const fn file_tag(self) -> &'static str {
        match self {
            Self::Stage => "==> ",
            Self::Error => "    [error] ",
            Self::Warn => "    [warn] ",
            Self::Debug => "    [debug] ",
            Self::Info | Self::Hint => "    ",
        }
    }
}

/// Where a formatted event ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LineFormat {
    /// Coloured, untimed lines for stdout/stderr.
    Terminal,
    /// Plain lines prefixed with the UTC time.
    LogFile,
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let msg = visitor.0;
        let kind = LineKind::of(event);

        if *self == Self::LogFile {
            return writeln!(writer, "[{}] {}{msg}", format_utc_time(), kind.file_tag());
        }
        match kind {
            LineKind::Error => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            LineKind::Warn => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            LineKind::Stage => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            LineKind::Info => writeln!(writer, "  {msg}"),
            LineKind::Hint | LineKind::Debug => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Layer type appending [`LineFormat::LogFile`] lines to an open file.
pub(super) type FileLayer<S> =
    fmt::Layer<S, fmt::format::DefaultFields, LineFormat, Mutex<fs::File>>;

/// Start a fresh log file for `command` with a one-line run header and
/// return a layer that appends to it.
///
/// Returns `None` if the cache directory or the file is unavailable.
pub(super) fn file_layer<S>(command: &str) -> Option<FileLayer<S>>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let path = log_file_path(command)?;
    let version =
        option_env!("BG3_MODS_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
    let header = format!(
        "# bg3-mods {version} {command} started {} UTC\n",
        format_utc_datetime()
    );
    fs::write(&path, header).ok()?;
    let file = fs::OpenOptions::new().append(true).open(&path).ok()?;

    Some(
        fmt::layer()
            .event_format(LineFormat::LogFile)
            .with_writer(Mutex::new(file)),
    )
}

/// Install the global subscriber: terminal output (warnings and errors on
/// stderr, the rest on stdout) plus the `debug`-level log file for
/// `command`.  Call once, before anything logs.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let terminal_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let terminal = fmt::layer()
        .event_format(LineFormat::Terminal)
        .with_writer(
            std::io::stderr
                .with_max_level(Level::WARN)
                .and(std::io::stdout.with_min_level(Level::INFO)),
        )
        .with_filter(terminal_level);

    tracing_subscriber::registry()
        .with(terminal)
        .with(file_layer(command).map(|layer| layer.with_filter(LevelFilter::DEBUG)))
        .init();
}
