//! Estimator configuration.
//!
//! Configuration is validated before any worker is spawned, so invalid
//! worker or point counts never start partial work.

use crate::error::ConfigError;
use std::time::Duration;

/// Maximum number of sample points allowed.
pub const MAX_POINTS: usize = 1_000_000_000;

/// Maximum number of workers allowed.
pub const MAX_WORKERS: usize = 1024;

/// Default per-worker idle timeout applied by the aggregator.
pub const DEFAULT_WORKER_TIMEOUT: Duration = Duration::from_secs(30);

/// Output mode of a sampling run.
///
/// In `Verbose` mode each worker streams an event per inside point before
/// its terminal partial result; in `Normal` mode only the partial result
/// is sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SampleMode {
    /// One partial result per worker, nothing else.
    #[default]
    Normal,
    /// Stream every inside point, then the partial result.
    Verbose,
}

/// Immutable configuration for an estimation run.
///
/// Use [`EstimatorConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use estimator_engine::config::{EstimatorConfig, SampleMode};
///
/// let config = EstimatorConfig::builder()
///     .worker_count(4)
///     .total_points(100_000)
///     .mode(SampleMode::Verbose)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.worker_count(), 4);
/// assert_eq!(config.seed(), 42);
/// ```
#[derive(Clone, Debug)]
pub struct EstimatorConfig {
    worker_count: usize,
    total_points: usize,
    mode: SampleMode,
    seed: u64,
    worker_timeout: Duration,
}

impl EstimatorConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EstimatorConfigBuilder {
        EstimatorConfigBuilder::default()
    }

    /// Number of workers the sample space is partitioned across.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Total number of sample points across all workers.
    #[inline]
    pub fn total_points(&self) -> usize {
        self.total_points
    }

    /// Output mode.
    #[inline]
    pub fn mode(&self) -> SampleMode {
        self.mode
    }

    /// Base seed. Worker `w` derives its own seed as `seed ^ w`.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Per-worker idle timeout enforced while draining results.
    #[inline]
    pub fn worker_timeout(&self) -> Duration {
        self.worker_timeout
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `worker_count` or `total_points` is zero
    /// or above its sanity bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 || self.worker_count > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount(self.worker_count));
        }
        if self.total_points == 0 || self.total_points > MAX_POINTS {
            return Err(ConfigError::InvalidPointCount(self.total_points));
        }
        Ok(())
    }
}

/// Builder for [`EstimatorConfig`].
///
/// Unset fields fall back to defaults: worker count = available CPUs,
/// seed = fresh entropy (the chosen value is retrievable from the built
/// config so a run can still be reproduced). `total_points` must be set.
#[derive(Clone, Debug, Default)]
pub struct EstimatorConfigBuilder {
    worker_count: Option<usize>,
    total_points: Option<usize>,
    mode: SampleMode,
    seed: Option<u64>,
    worker_timeout: Option<Duration>,
}

impl EstimatorConfigBuilder {
    /// Sets the number of workers.
    #[inline]
    pub fn worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = Some(worker_count);
        self
    }

    /// Sets the total number of sample points.
    #[inline]
    pub fn total_points(mut self, total_points: usize) -> Self {
        self.total_points = Some(total_points);
        self
    }

    /// Sets the output mode.
    #[inline]
    pub fn mode(mut self, mode: SampleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the base seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the per-worker idle timeout.
    #[inline]
    pub fn worker_timeout(mut self, timeout: Duration) -> Self {
        self.worker_timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `total_points` is not set, or any value
    /// fails validation.
    pub fn build(self) -> Result<EstimatorConfig, ConfigError> {
        let total_points = self.total_points.ok_or(ConfigError::InvalidParameter {
            name: "total_points",
            value: "must be specified".to_string(),
        })?;

        let config = EstimatorConfig {
            worker_count: self.worker_count.unwrap_or_else(num_cpus::get),
            total_points,
            mode: self.mode,
            seed: self.seed.unwrap_or_else(rand::random),
            worker_timeout: self.worker_timeout.unwrap_or(DEFAULT_WORKER_TIMEOUT),
        };

        config.validate()?;
        Ok(config)
    }
}
