//! `tracing` subscriber setup.
//!
//! CLI commands log to stderr. The TUI owns stdout, so it only logs when a log
//! file is configured.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::AppError;

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    /// Use `LogConfig::file`, or stay silent when none is set.
    FileOnly,
}

pub fn init(config: &LogConfig, sink: LogSink) -> Result<(), AppError> {
    let filter = env_filter(&config.filter)?;

    match (sink, &config.file) {
        (LogSink::Stderr, _) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}"))),
        (LogSink::FileOnly, Some(path)) => init_file(filter, path),
        (LogSink::FileOnly, None) => Ok(()),
    }
}

fn init_file(filter: EnvFilter, path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open log file '{}': {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}")))
}

/// `RUST_LOG` wins; otherwise the configured directive.
fn env_filter(fallback: &str) -> Result<EnvFilter, AppError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback)
            .map_err(|e| AppError::new(2, format!("Invalid log filter '{fallback}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_without_file_is_a_no_op() {
        let config = LogConfig {
            filter: "info".to_string(),
            file: None,
        };
        assert!(init(&config, LogSink::FileOnly).is_ok());
    }
}
