//! Log setup: console plus a plain-text log file.
//!
//! The subscriber is built explicitly so tests can install it scoped
//! (`tracing::subscriber::with_default`) instead of globally.

use std::fmt::Write as _;
use std::path::Path;

use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Timestamp format of every log line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock timer for log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", timestamp(&chrono::Local::now()))
    }
}

/// Format a point in time the way log lines show it.
pub fn timestamp<Tz>(at: &chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Open (or create) `path` for appending log lines. The parent directory is
/// created if missing.
pub fn file_writer(path: &Path) -> Result<RollingFileAppender, InitError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| crate::config::DEFAULT_LOG_FILE.to_string());

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
}

/// Build the subscriber: env filter, stderr layer, and an optional file layer.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn subscriber(
    level: &str,
    file: Option<RollingFileAppender>,
) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_timer(LocalTimer)
        .with_writer(std::io::stderr);

    let file_layer = file.map(|appender| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_timer(LocalTimer)
            .with_writer(appender)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
}

/// Install the global subscriber, logging to stderr and to `log_file`.
///
/// If the log file cannot be opened, logging falls back to stderr only and
/// a warning is emitted.
pub fn init(level: &str, log_file: &Path) {
    let (file, file_error) = match file_writer(log_file) {
        Ok(appender) => (Some(appender), None),
        Err(e) => (None, Some(e)),
    };

    if subscriber(level, file).try_init().is_err() {
        // Already installed (e.g. by a test harness); keep that one.
        return;
    }

    if let Some(e) = file_error {
        tracing::warn!(
            path = %log_file.display(),
            error = %e,
            "Could not open log file, logging to console only"
        );
    }
}
