//! Session configuration from environment variables.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::DEFAULT_TIME_LIMIT_MS;

/// Knobs shared by every session a controller starts.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Advisory per-move budget.
    pub time_limit: Duration,
    /// Seed for scripted players; each seat and game derives its own stream.
    pub seed: u32,
    /// Append one JSON line per finished game here.
    pub record_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_millis(DEFAULT_TIME_LIMIT_MS),
            seed: 1,
            record_path: None,
        }
    }
}

impl SessionConfig {
    /// Read `ISOLATION_TIME_LIMIT_MS`, `ISOLATION_SEED` and
    /// `ISOLATION_RECORD_PATH`. Unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        use std::env;

        let time_limit = env::var("ISOLATION_TIME_LIMIT_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_TIME_LIMIT_MS));

        let seed = env::var("ISOLATION_SEED")
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or_else(clock_seed);

        let record_path = env::var("ISOLATION_RECORD_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            time_limit,
            seed,
            record_path,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
