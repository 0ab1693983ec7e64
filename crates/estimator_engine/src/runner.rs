//! Ready-made execution strategies.
//!
//! Two deployments of the same worker/aggregator logic:
//!
//! - [`run_threaded`]: one OS thread per share, in-process channel
//!   transports, aggregator on the calling thread. The worker and
//!   aggregation code is identical to what a pipe or socket deployment
//!   would run; only the transport binding differs.
//! - [`run_batch`]: rayon parallel fold over the shares with one merge
//!   at the end. No channels, no per-point synchronisation of any kind.

use crate::aggregate::{Aggregator, Estimate, PointFn, ProgressFn};
use crate::config::EstimatorConfig;
use crate::error::EngineError;
use crate::partition::partition;
use crate::sampler::{worker_seed, PointSampler};
use crate::transport::{channel, Message, PartialResult};
use crate::worker::run_worker;
use estimator_core::geometry::{BoundingRegion, Polygon};
use rayon::prelude::*;
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// Optional observers threaded through a run.
#[derive(Default)]
pub struct RunObservers {
    /// Progress callback (percent, monotone).
    pub on_progress: Option<ProgressFn>,
    /// Verbose inside-point callback.
    pub on_point: Option<PointFn>,
}

/// Runs an estimation with one thread per worker share.
///
/// Equivalent to [`run_threaded_with`] without observers; progress is
/// still logged through `tracing`.
pub fn run_threaded(
    config: &EstimatorConfig,
    polygon: &Polygon,
    region: &BoundingRegion,
) -> Result<Estimate, EngineError> {
    run_threaded_with(config, polygon, region, RunObservers::default())
}

/// Runs an estimation with one thread per worker share, reporting to the
/// given observers.
///
/// Workers are detached rather than joined unconditionally: the
/// aggregator's per-channel idle timeout bounds the wait for a hung
/// worker, and stragglers are reported as missing coverage instead of
/// wedging the caller.
///
/// # Errors
///
/// `ConfigError` before any thread is spawned; `PartialCoverage` when
/// not every share was accounted for.
pub fn run_threaded_with(
    config: &EstimatorConfig,
    polygon: &Polygon,
    region: &BoundingRegion,
    observers: RunObservers,
) -> Result<Estimate, EngineError> {
    config.validate()?;
    let shares = partition(config.total_points(), config.worker_count())?;

    let polygon = Arc::new(polygon.clone());
    let region = *region;
    let mode = config.mode();

    let mut receivers = Vec::with_capacity(shares.len());
    let mut handles = Vec::with_capacity(shares.len());

    for share in shares {
        let (mut tx, rx) = channel();
        receivers.push(rx);

        let polygon = Arc::clone(&polygon);
        let seed = worker_seed(config.seed(), share.worker_id);
        let handle = thread::Builder::new()
            .name(format!("estimator-worker-{}", share.worker_id))
            .spawn(move || {
                if let Err(err) = run_worker(&polygon, &region, &share, mode, seed, &mut tx) {
                    error!(worker = share.worker_id, %err, "worker aborted");
                }
            })
            .expect("spawning a worker thread");
        handles.push((share.worker_id, handle));
    }

    let mut aggregator = Aggregator::new(region, config.total_points(), config.worker_count());
    if let Some(f) = observers.on_progress {
        aggregator = aggregator.with_progress(f);
    } else {
        aggregator = aggregator.with_progress(Box::new(|percent| {
            info!(percent, "progress");
        }));
    }
    if let Some(f) = observers.on_point {
        aggregator = aggregator.with_point_observer(f);
    }

    aggregator.drain(receivers, config.worker_timeout());

    // Harvest panic status from workers that did finish; a hung worker
    // was already recorded as a timeout fault and is left detached.
    for (worker_id, handle) in handles {
        if handle.is_finished() && handle.join().is_err() {
            error!(worker = worker_id, "worker panicked");
        }
    }

    aggregator.finish()
}

/// Runs an estimation as a rayon batch: each share folds into its
/// partial result on the thread pool, and the partials merge once at
/// the end.
///
/// Same seed schedule as [`run_threaded`], so both runners produce
/// identical counts for a given configuration.
///
/// # Errors
///
/// `ConfigError` for invalid configurations. Batch execution cannot
/// lose a share, so a complete estimate is returned on success.
pub fn run_batch(
    config: &EstimatorConfig,
    polygon: &Polygon,
    region: &BoundingRegion,
) -> Result<Estimate, EngineError> {
    config.validate()?;
    let shares = partition(config.total_points(), config.worker_count())?;

    let partials: Vec<PartialResult> = shares
        .par_iter()
        .map(|share| {
            let mut sampler = PointSampler::new(region, worker_seed(config.seed(), share.worker_id));
            let inside = (0..share.count)
                .filter(|_| polygon.contains(sampler.next_point()))
                .count();
            PartialResult {
                worker_id: share.worker_id,
                processed: share.count,
                inside,
            }
        })
        .collect();

    let mut aggregator = Aggregator::new(*region, config.total_points(), config.worker_count());
    for pr in partials {
        aggregator.apply(Message::Partial(pr));
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(points: usize, workers: usize) -> EstimatorConfig {
        EstimatorConfig::builder()
            .worker_count(workers)
            .total_points(points)
            .seed(42)
            .build()
            .unwrap()
    }

    fn square2() -> (Polygon, BoundingRegion) {
        (
            Polygon::parse("0 0\n2 0\n2 2\n0 2\n").unwrap(),
            BoundingRegion::new(0.0, 2.0, 0.0, 2.0).unwrap(),
        )
    }

    #[test]
    fn test_threaded_accounts_for_every_point() {
        let (polygon, region) = square2();
        let estimate = run_threaded(&config(10_000, 4), &polygon, &region).unwrap();

        assert_eq!(estimate.total_processed, 10_000);
        assert_eq!(estimate.partials.len(), 4);
        let from_partials: usize = estimate.partials.iter().map(|p| p.processed).sum();
        assert_eq!(from_partials, 10_000);
    }

    #[test]
    fn test_threaded_and_batch_agree() {
        let polygon = Polygon::parse("0 0\n1 0\n1 1\n0 1\n").unwrap();
        let region = BoundingRegion::new(0.0, 2.0, 0.0, 2.0).unwrap();
        let cfg = config(20_000, 3);

        let threaded = run_threaded(&cfg, &polygon, &region).unwrap();
        let batch = run_batch(&cfg, &polygon, &region).unwrap();

        assert_eq!(threaded.total_inside, batch.total_inside);
        assert_eq!(threaded.total_processed, batch.total_processed);
    }

    #[test]
    fn test_batch_is_reproducible() {
        let (polygon, region) = square2();
        let cfg = config(5_000, 2);

        let a = run_batch(&cfg, &polygon, &region).unwrap();
        let b = run_batch(&cfg, &polygon, &region).unwrap();

        assert_eq!(a.total_inside, b.total_inside);
    }

    #[test]
    fn test_more_workers_than_points() {
        let (polygon, region) = square2();
        let estimate = run_threaded(&config(3, 8), &polygon, &region).unwrap();

        assert_eq!(estimate.total_processed, 3);
        assert_eq!(estimate.partials.len(), 8);
    }
}
