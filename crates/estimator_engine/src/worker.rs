//! Worker unit: samples one share and reports exactly once.

use crate::config::SampleMode;
use crate::error::EngineError;
use crate::partition::Share;
use crate::sampler::PointSampler;
use crate::transport::{Message, PartialResult, TransportSender};
use estimator_core::geometry::{BoundingRegion, Polygon};
use tracing::debug;

/// Runs one worker over its share.
///
/// Draws `share.count` points from a sampler owned by this worker,
/// tests each against the polygon and accumulates the inside count
/// locally; no shared counters, no locks in the sampling loop. In
/// [`SampleMode::Verbose`] every inside point is streamed as an event
/// before the terminal [`PartialResult`]; the terminal result is always
/// the last message on the channel.
///
/// # Errors
///
/// A failed send aborts the worker with [`EngineError::Transport`].
/// The failure is never swallowed: the aggregator will notice the
/// missing share and report partial coverage.
pub fn run_worker<S: TransportSender>(
    polygon: &Polygon,
    region: &BoundingRegion,
    share: &Share,
    mode: SampleMode,
    seed: u64,
    sender: &mut S,
) -> Result<PartialResult, EngineError> {
    let mut sampler = PointSampler::new(region, seed);
    let mut inside = 0usize;

    for _ in 0..share.count {
        let p = sampler.next_point();
        if polygon.contains(p) {
            inside += 1;
            if mode == SampleMode::Verbose {
                sender.send(Message::InsidePoint {
                    worker_id: share.worker_id,
                    x: p.x,
                    y: p.y,
                })?;
            }
        }
    }

    let result = PartialResult {
        worker_id: share.worker_id,
        processed: share.count,
        inside,
    };
    sender.send(Message::Partial(result))?;

    debug!(
        worker = share.worker_id,
        processed = result.processed,
        inside = result.inside,
        seed,
        "worker finished share"
    );

    Ok(result)
}
