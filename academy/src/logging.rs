use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the background log writer alive. Dropping it flushes buffered lines.
pub struct LogGuard {
    pub path: PathBuf,
    _worker: WorkerGuard,
}

/// Initialize tracing with file-based logging
/// Logs are written to ~/.config/academy/logs/academy-YYYY-MM-DD-HH-MM-SS.log;
/// writing to the terminal would corrupt the TUI.
pub fn init_logging() -> Result<LogGuard> {
    let logs_dir = dirs::config_dir()
        .ok_or(anyhow::anyhow!("Could not find config directory"))?
        .join("academy")
        .join("logs");
    std::fs::create_dir_all(&logs_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_filename = format!("academy-{}.log", timestamp);
    let (non_blocking, worker) = file_writer(&logs_dir, &log_filename);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // Default to INFO, can be overridden with RUST_LOG
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok(LogGuard {
        path: logs_dir.join(log_filename),
        _worker: worker,
    })
}

fn file_writer(dir: &Path, filename: &str) -> (NonBlocking, WorkerGuard) {
    let file_appender = tracing_appender::rolling::never(dir, filename);
    tracing_appender::non_blocking(file_appender)
}
