//! Rolling Logger
//!
//! Installs a global `tracing` subscriber that writes to a size-rotated log
//! file and keeps the latest lines in memory. `log` records are bridged into
//! the same subscriber, so callers may use either macro family.

mod recent;
mod writer;

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use recent::RecentLines;
pub use writer::RollingWriter;

static RECENT: OnceLock<Arc<RecentLines>> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install subscriber: {0}")]
    Subscriber(String),

    #[error("Logger not initialized")]
    NotInitialized,
}

/// Tunables for [`init_logger_with`]
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Live file size that triggers a rotation
    pub max_file_bytes: u64,
    /// Live file plus backups
    pub max_files: usize,
    /// Lines kept in memory
    pub recent_capacity: usize,
    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 3,
            recent_capacity: 200,
            default_filter: "info".to_string(),
        }
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize the logger with default limits.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, LoggerConfig::default())
}

pub fn init_logger_with(
    log_dir: PathBuf,
    app_name: &str,
    config: LoggerConfig,
) -> Result<(), LoggerError> {
    let recent = Arc::new(RecentLines::new(config.recent_capacity));
    let file_writer = RollingWriter::open(
        &log_dir,
        app_name,
        config.max_file_bytes,
        config.max_files,
        recent.clone(),
    )?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_ansi(false)
                .with_target(true)
                .with_writer(file_writer),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    let _ = RECENT.set(recent);
    log::info!("{} logging to {}", app_name, log_dir.display());
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    RECENT.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Latest log lines, oldest first. Empty before initialization.
pub fn recent_lines() -> Vec<String> {
    RECENT.get().map(|r| r.snapshot()).unwrap_or_default()
}
