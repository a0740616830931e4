//! Tracing setup for the CLI.
//!
//! - Console: compact, on stderr so stdout stays machine-readable
//! - File: daily rotation in `<data dir>/quadra/logs/`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file prefix, producing files like `quadra.2026-01-22.log`.
pub const LOG_PREFIX: &str = "quadra";

/// Directives applied when `RUST_LOG` is not set.
const DEFAULT_DIRECTIVES: &[&str] = &["quadra=debug", "quadra_core=debug", "quadra_storage=debug"];

pub fn logs_dir() -> PathBuf {
    quadra_storage::default_data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        DEFAULT_DIRECTIVES
            .iter()
            .filter_map(|directive| directive.parse().ok())
            .fold(EnvFilter::new("info"), EnvFilter::add_directive)
    })
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the duration of the program.
pub fn init_tracing(logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create logs directory: {:?}", logs_dir))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(logs_dir)
        .context("Failed to create log file appender")?;
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .compact()
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
