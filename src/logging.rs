//! File logging for the binary.
//!
//! The terminal belongs to the renderer, so logs only go to a file, and only
//! when `ISOLATION_LOG_PATH` is set.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub path: Option<PathBuf>,
    /// Used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let path = std::env::var("ISOLATION_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });
        Self {
            path,
            default_filter: "info".to_string(),
        }
    }
}

/// Install the global subscriber. A no-op without a log path.
pub fn init(config: &LogConfig) -> Result<()> {
    let Some(path) = &config.path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.default_filter)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))
}
