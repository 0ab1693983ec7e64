//! Error types for the sampling engine.

use crate::aggregate::Estimate;
use crate::transport::TransportError;
use estimator_core::types::GeometryError;
use thiserror::Error;

/// Configuration errors raised before any worker is spawned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Worker count outside the valid range.
    #[error("invalid worker count {0}: must be in range [1, 1024]")]
    InvalidWorkerCount(usize),

    /// Point count outside the valid range.
    #[error("invalid point count {0}: must be in range [1, 1_000_000_000]")]
    InvalidPointCount(usize),

    /// Invalid parameter value with name and description.
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Errors raised while running an estimation.
///
/// Configuration and geometry errors are fatal at startup. A transport
/// failure or timeout on one worker's channel never crashes the
/// aggregator; it is recorded and surfaces as [`EngineError::PartialCoverage`]
/// once draining completes, with the partial estimate attached so the
/// caller can still inspect it without mistaking it for a complete one.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid run configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid polygon or bounding region.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// A worker's channel failed outright.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A worker stayed silent past the configured idle timeout.
    #[error("worker channel {channel} timed out before reporting")]
    WorkerTimeout {
        /// Index of the silent channel.
        channel: usize,
    },

    /// A worker thread panicked before reporting.
    #[error("worker {worker} panicked")]
    WorkerPanicked {
        /// Identifier of the panicked worker.
        worker: usize,
    },

    /// Not every share was accounted for at the end of aggregation.
    #[error(
        "partial coverage: processed {processed} of {expected} points, missing workers {failed_workers:?}"
    )]
    PartialCoverage {
        /// Points that should have been processed.
        expected: usize,
        /// Points actually accounted for.
        processed: usize,
        /// Workers that never delivered a terminal result.
        failed_workers: Vec<usize>,
        /// The (biased) estimate over the points that did arrive.
        estimate: Box<Estimate>,
    },
}
