//! Logging Module
//!
//! Structured logging with file output for diagnostics. Stdout is reserved for
//! rendered views, so console logs go to stderr and only when asked for.

use std::path::Path;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "pricepulse.log";

/// Initialize logging with file output and optional stderr output
///
/// If the log directory is unusable the subscriber is still installed, logging
/// to stderr only, and the appender error is returned for the caller to report.
pub fn init(config: &LoggingConfig, log_dir: &Path, verbose: bool) -> Result<(), InitError> {
    let (file_layer, file_error) = match file_appender(log_dir) {
        Ok(appender) => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(appender);
            (Some(layer), None)
        }
        Err(e) => (None, Some(e)),
    };

    let console_layer = (verbose || config.console || file_error.is_some()).then(|| {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer);

    let _ = tracing::subscriber::set_global_default(subscriber);

    match file_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Daily-rotating appender; creates `log_dir` if missing
fn file_appender(log_dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
}

fn filter_directive(level: &str) -> String {
    format!("{},hyper=warn,reqwest=warn", level)
}
