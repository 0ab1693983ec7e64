//! # estimator_engine: Parallel Sampling & Aggregation
//!
//! ## Layer 2 (Engine) Role
//!
//! estimator_engine turns the pure geometry of `estimator_core` into a
//! parallel Monte-Carlo area estimate:
//!
//! 1. Configuration with validation (`config`)
//! 2. Seeded, per-worker point sampling (`sampler`)
//! 3. Workload partitioning into disjoint shares (`partition`)
//! 4. Worker units producing one partial result each (`worker`)
//! 5. A transport abstraction so pipes, sockets and in-process channels
//!    all carry the same messages (`transport`)
//! 6. An aggregator with bounded waits and progress reporting
//!    (`aggregate`)
//! 7. Ready-made runners: thread-per-worker over channels, and a rayon
//!    batch fold (`runner`)
//!
//! Workers never share mutable state: each owns its sampler and its
//! counters, and the only synchronisation point is the one-shot send of
//! its partial result. The aggregator is the sole writer of the running
//! totals.
//!
//! ## Usage Examples
//!
//! ```rust
//! use estimator_core::geometry::{BoundingRegion, Polygon};
//! use estimator_core::types::Point;
//! use estimator_engine::config::EstimatorConfig;
//! use estimator_engine::runner::run_threaded;
//!
//! let square = Polygon::parse("0 0\n2 0\n2 2\n0 2\n").unwrap();
//! let region = BoundingRegion::new(0.0, 2.0, 0.0, 2.0).unwrap();
//!
//! let config = EstimatorConfig::builder()
//!     .worker_count(4)
//!     .total_points(20_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let estimate = run_threaded(&config, &square, &region).unwrap();
//! assert!((estimate.area - 4.0).abs() < 0.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod partition;
pub mod runner;
pub mod sampler;
pub mod transport;
pub mod worker;

pub use aggregate::{Aggregator, Estimate};
pub use config::{EstimatorConfig, SampleMode};
pub use error::{ConfigError, EngineError};
pub use partition::{partition, Share};
pub use transport::{Message, PartialResult};
