//! Tracing setup: terminal output plus a daily rolling log file.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Terminal filter directive for a `-v` count.
fn terminal_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// The terminal honors `RUST_LOG` and falls back to the `-v` level. The file
/// under `logs_dir` always records `info` and above. Keep the returned guard
/// alive until exit so buffered lines get flushed.
pub fn init(logs_dir: &Path, verbose: u8) -> Result<WorkerGuard> {
    let terminal_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(terminal_level(verbose)));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("zeroth")
        .filename_suffix("log")
        .build(logs_dir)
        .with_context(|| format!("Failed to open log directory {}", logs_dir.display()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(terminal_filter),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(LevelFilter::INFO),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
