//! Tracing subscriber set-up for the `flames` binary.

use anyhow::{Context, Result};
use flames_infrastructure::FlamesPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Filter for one-shot commands, whose stdout is the actual output.
const STDERR_FILTER: &str = "flames=warn";
/// Filter for the interactive page, which logs to a file.
const FILE_FILTER: &str = "flames=info";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logs to stderr, honouring `RUST_LOG`.
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(STDERR_FILTER))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Logs to a daily rolling file so log lines never interleave with the prompt.
///
/// The returned guard must outlive the program's logging.
pub fn init_file() -> Result<WorkerGuard> {
    let logs_dir = FlamesPaths::new(None)
        .logs_dir()
        .context("Failed to resolve the logs directory")?;
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "flames.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(FILE_FILTER))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("[Bootstrap] Logging to {}", logs_dir.display());
    Ok(guard)
}
