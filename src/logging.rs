use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::APP_DIR;

pub const LOG_FILE_NAME: &str = "typing-vibes.log";

pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(LOG_FILE_NAME)
}

/// Send `tracing` output to a file. The terminal belongs to the UI, so
/// nothing is ever written to stdout or stderr.
///
/// `RUST_LOG` wins over `level` when set. Keep the returned guard alive for
/// the life of the program or buffered lines are lost on exit.
pub fn init(path: &Path, level: &str) -> Result<WorkerGuard> {
    let parent = path
        .parent()
        .with_context(|| format!("log path {} has no parent directory", path.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("cannot create log directory {}", parent.display()))?;

    let appender = tracing_appender::rolling::never(parent, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level '{level}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))?;

    Ok(guard)
}
