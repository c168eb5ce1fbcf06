//! Tracing setup: progress on stderr, full trace in a diagnostic log.
//!
//! The diagnostic log is appended to on every run. If it cannot be opened the
//! program keeps going with stderr only; logging problems never abort a run.

use chrono::Local;
use std::path::Path;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter for the diagnostic log file.
const FILE_FILTER: &str = "ria_headlines=debug,warn";

/// stderr filter when `RUST_LOG` is unset.
const DEFAULT_CONSOLE_FILTER: &str = "info";

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit; dropping it flushes the log file.
pub fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let (appender, file_error) = match log_file.map(open_appender) {
        Some(Ok(appender)) => (Some(appender), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    // RUST_LOG tunes stderr; the file always records the full trace.
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));
    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_timer(UtcTime::rfc_3339())
                .with_writer(writer)
                .with_filter(EnvFilter::new(FILE_FILTER));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("tracing setup failed: {e}");
    }

    if let Some(e) = file_error {
        warn!(error = %e, "Diagnostic log unavailable; logging to stderr only");
    }
    info!(
        "=== Парсинг RIA.ru | Запуск: {} ===",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    guard
}

fn open_appender(path: &Path) -> Result<RollingFileAppender, String> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| format!("{} has no file name", path.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .map_err(|e| format!("failed to open {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_appender_appends_to_exact_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news_parser.log");
        std::fs::write(&path, "previous run\n").unwrap();

        let mut appender = open_appender(&path).unwrap();
        appender.write_all(b"next run\n").unwrap();
        appender.flush().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "previous run\nnext run\n");
    }

    #[test]
    fn test_default_console_filter_is_info() {
        assert_eq!(EnvFilter::new(DEFAULT_CONSOLE_FILTER).to_string(), "info");
    }

    #[test]
    fn test_open_appender_without_file_name_fails() {
        assert!(open_appender(Path::new("/")).is_err());
    }
}
