//! CLI configuration management.
//!
//! Defaults come from an optional TOML file, overridden by `POLYMC_*`
//! environment variables, overridden in turn by command-line flags.

use serde::Deserialize;
use std::path::Path;

/// File-level configuration for estimation runs
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    /// Total sample points
    pub points: Option<usize>,

    /// Worker count
    pub workers: Option<usize>,

    /// Sampling mode ("normal" or "verbose")
    pub mode: Option<String>,

    /// Base seed
    pub seed: Option<u64>,

    /// Per-worker idle timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            points: None,
            workers: None,
            mode: None,
            seed: None,
            timeout_secs: None,
            log_level: default_log_level(),
        }
    }
}

impl FileConfig {
    /// Load configuration from a TOML file, falling back to defaults if
    /// the file is missing or malformed.
    pub fn load_or_default(path: &str) -> Self {
        let path = Path::new(path);
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(points) = std::env::var("POLYMC_POINTS") {
            self.points = points.parse().ok();
        }

        if let Ok(workers) = std::env::var("POLYMC_WORKERS") {
            self.workers = workers.parse().ok();
        }

        if let Ok(mode) = std::env::var("POLYMC_MODE") {
            self.mode = Some(mode);
        }

        if let Ok(seed) = std::env::var("POLYMC_SEED") {
            self.seed = seed.parse().ok();
        }

        if let Ok(timeout) = std::env::var("POLYMC_TIMEOUT_SECS") {
            self.timeout_secs = timeout.parse().ok();
        }

        if let Ok(log_level) = std::env::var("POLYMC_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }
}
