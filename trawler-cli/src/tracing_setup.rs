//! Tracing setup for Trawler
//!
//! Provides dual output: console logs at the user's chosen level and a full
//! trace log of the last run on disk.

use std::fs::{File, create_dir_all};
use std::path::Path;

use anyhow::Context;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Initialize tracing with dual output: console (user level) + file (full trace)
///
/// `RUST_LOG` takes precedence over `console_level` for the console. The file
/// `trawler-last-run.log` under `logs_dir` (default `./logs`) is overwritten
/// on every run.
///
/// # Errors
/// - Logs directory cannot be created or the log file cannot be opened
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> anyhow::Result<()> {
    let logs_path = logs_dir.unwrap_or_else(|| Path::new("logs"));

    create_dir_all(logs_path)
        .with_context(|| format!("Cannot create logs directory {}", logs_path.display()))?;

    let log_file_path = logs_path.join("trawler-last-run.log");
    let log_file = File::create(&log_file_path)
        .with_context(|| format!("Cannot open log file {}", log_file_path.display()))?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level.to_string()));

    // Records go to stdout; keep the console on stderr.
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!(
        "Tracing initialized: console={}, debug_file={}",
        console_level,
        log_file_path.display()
    );

    Ok(())
}

/// CLI log levels for user control
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Page progress, totals and skips
    Info,
    /// Per-item resolution details
    Debug,
    /// All messages
    Trace,
}

impl CliLogLevel {
    pub fn as_tracing_level(self) -> Level {
        match self {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(CliLogLevel::Warn.as_tracing_level(), Level::WARN);
        assert_eq!(CliLogLevel::Trace.as_tracing_level(), Level::TRACE);
    }
}
