//! Result aggregation.
//!
//! The aggregator is the single writer of the running totals. It drains
//! every worker's receiver round-robin with a short poll slice, so one
//! slow worker cannot stall the others' buffers, and enforces a
//! per-receiver idle deadline instead of blocking indefinitely on a
//! worker that never reports.

use crate::error::EngineError;
use crate::transport::{Message, PartialResult, Polled, TransportReceiver};
use estimator_core::geometry::BoundingRegion;
use estimator_core::types::Point;
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::warn;

/// Poll slice per receiver in the round-robin drain loop.
const POLL_SLICE: Duration = Duration::from_millis(10);

/// Running totals, owned exclusively by the aggregator.
///
/// Created at zero before any worker starts, grows monotonically as
/// messages arrive, and becomes the final reading once every worker has
/// reported. Accumulation is pure addition, so the result is independent
/// of the order workers happen to report in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregateState {
    /// Points accounted for so far.
    pub total_processed: usize,
    /// Points found inside the polygon so far.
    pub total_inside: usize,
}

/// Final output of an estimation run.
#[derive(Clone, Debug, Serialize)]
pub struct Estimate {
    /// Estimated polygon area.
    pub area: f64,
    /// Points requested for the whole run.
    pub total_points: usize,
    /// Points actually processed.
    pub total_processed: usize,
    /// Points found inside the polygon.
    pub total_inside: usize,
    /// Area of the sampling region the estimate is scaled by.
    pub region_area: f64,
    /// Per-worker terminal results, in arrival order.
    pub partials: Vec<PartialResult>,
}

/// Progress callback: receives a percentage in `0..=100`, monotonically
/// non-decreasing.
pub type ProgressFn = Box<dyn FnMut(u8) + Send>;

/// Observer for verbose inside-point events.
pub type PointFn = Box<dyn FnMut(usize, Point) + Send>;

/// Collects partial results (and verbose events) into a final estimate.
///
/// # Verbose reconciliation
///
/// In verbose mode a worker streams one event per inside point before
/// its terminal result. Events advance the running totals as they
/// arrive, so progress is live; the terminal result is then applied as
/// a delta against what that worker already streamed, so a worker is
/// never double-counted, and a stream that dies between its events and
/// its terminal record still shows up as missing coverage.
///
/// # Examples
///
/// ```rust
/// use estimator_core::geometry::BoundingRegion;
/// use estimator_engine::aggregate::Aggregator;
/// use estimator_engine::transport::{Message, PartialResult};
///
/// let region = BoundingRegion::new(0.0, 2.0, 0.0, 2.0).unwrap();
/// let mut aggregator = Aggregator::new(region, 100, 2);
///
/// aggregator.apply(Message::Partial(PartialResult { worker_id: 0, processed: 50, inside: 25 }));
/// aggregator.apply(Message::Partial(PartialResult { worker_id: 1, processed: 50, inside: 25 }));
///
/// let estimate = aggregator.finish().unwrap();
/// assert_eq!(estimate.area, 2.0);
/// ```
pub struct Aggregator {
    region: BoundingRegion,
    total_points: usize,
    worker_count: usize,
    state: AggregateState,
    /// Per-worker (processed, inside) counts already streamed as events.
    streamed: HashMap<usize, (usize, usize)>,
    partials: Vec<PartialResult>,
    faults: Vec<EngineError>,
    last_percent: Option<u8>,
    on_progress: Option<ProgressFn>,
    on_point: Option<PointFn>,
}

impl Aggregator {
    /// Creates an aggregator expecting `total_points` across
    /// `worker_count` workers.
    pub fn new(region: BoundingRegion, total_points: usize, worker_count: usize) -> Self {
        Self {
            region,
            total_points,
            worker_count,
            state: AggregateState::default(),
            streamed: HashMap::new(),
            partials: Vec::with_capacity(worker_count),
            faults: Vec::new(),
            last_percent: None,
            on_progress: None,
            on_point: None,
        }
    }

    /// Installs a progress observer.
    ///
    /// Called after every state update with the current percentage; must
    /// be cheap, it runs on the aggregation path.
    pub fn with_progress(mut self, f: ProgressFn) -> Self {
        self.on_progress = Some(f);
        self
    }

    /// Installs an observer for verbose inside-point events.
    pub fn with_point_observer(mut self, f: PointFn) -> Self {
        self.on_point = Some(f);
        self
    }

    /// Current running totals.
    #[inline]
    pub fn state(&self) -> AggregateState {
        self.state
    }

    /// Faults recorded while draining (timeouts, dead channels).
    #[inline]
    pub fn faults(&self) -> &[EngineError] {
        &self.faults
    }

    /// Applies one message to the running totals.
    pub fn apply(&mut self, msg: Message) {
        match msg {
            Message::InsidePoint { worker_id, x, y } => {
                let seen = self.streamed.entry(worker_id).or_insert((0, 0));
                seen.0 += 1;
                seen.1 += 1;
                self.state.total_processed += 1;
                self.state.total_inside += 1;
                if let Some(f) = self.on_point.as_mut() {
                    f(worker_id, Point::new(x, y));
                }
            }
            Message::Partial(pr) => {
                if self.partials.iter().any(|p| p.worker_id == pr.worker_id) {
                    warn!(worker = pr.worker_id, "duplicate terminal result ignored");
                    return;
                }
                let seen = self
                    .streamed
                    .get(&pr.worker_id)
                    .copied()
                    .unwrap_or((0, 0));
                self.state.total_processed += pr.processed.saturating_sub(seen.0);
                self.state.total_inside += pr.inside.saturating_sub(seen.1);
                self.partials.push(pr);
            }
        }
        self.emit_progress();
    }

    /// Drains every receiver until it closes, times out or fails.
    ///
    /// Receivers are polled round-robin with a short slice; a receiver
    /// idle for longer than `timeout` is abandoned with a
    /// [`EngineError::WorkerTimeout`] fault rather than blocking the
    /// drain forever.
    pub fn drain<R: TransportReceiver>(&mut self, mut receivers: Vec<R>, timeout: Duration) {
        let n = receivers.len();
        let mut open = vec![true; n];
        let mut last_activity = vec![Instant::now(); n];
        let mut open_count = n;

        while open_count > 0 {
            for (i, receiver) in receivers.iter_mut().enumerate() {
                if !open[i] {
                    continue;
                }
                match receiver.poll(POLL_SLICE) {
                    Ok(Polled::Message(msg)) => {
                        last_activity[i] = Instant::now();
                        self.apply(msg);
                    }
                    Ok(Polled::Idle) => {
                        if last_activity[i].elapsed() >= timeout {
                            warn!(channel = i, ?timeout, "worker channel timed out");
                            self.faults.push(EngineError::WorkerTimeout { channel: i });
                            open[i] = false;
                            open_count -= 1;
                        }
                    }
                    Ok(Polled::Closed) => {
                        open[i] = false;
                        open_count -= 1;
                    }
                    Err(err) => {
                        warn!(channel = i, %err, "worker channel failed");
                        self.faults.push(EngineError::Transport(err));
                        open[i] = false;
                        open_count -= 1;
                    }
                }
            }
        }
    }

    /// Computes the final estimate.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PartialCoverage`] when the processed count
    /// does not match the requested total or a worker never delivered
    /// its terminal result. The partial estimate rides inside the error
    /// so callers can inspect it, but they must opt in explicitly.
    pub fn finish(self) -> Result<Estimate, EngineError> {
        let estimate = Estimate {
            area: self.region.area() * self.state.total_inside as f64 / self.total_points as f64,
            total_points: self.total_points,
            total_processed: self.state.total_processed,
            total_inside: self.state.total_inside,
            region_area: self.region.area(),
            partials: self.partials,
        };

        let mut failed_workers: Vec<usize> = (0..self.worker_count)
            .filter(|id| !estimate.partials.iter().any(|p| p.worker_id == *id))
            .collect();
        failed_workers.sort_unstable();

        if estimate.total_processed != self.total_points || !failed_workers.is_empty() {
            return Err(EngineError::PartialCoverage {
                expected: self.total_points,
                processed: estimate.total_processed,
                failed_workers,
                estimate: Box::new(estimate),
            });
        }

        Ok(estimate)
    }

    fn emit_progress(&mut self) {
        let percent = ((self.state.total_processed * 100 / self.total_points).min(100)) as u8;
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            if let Some(f) = self.on_progress.as_mut() {
                f(percent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::channel;
    use crate::transport::TransportSender;
    use approx::assert_relative_eq;

    fn region() -> BoundingRegion {
        BoundingRegion::new(0.0, 2.0, 0.0, 2.0).unwrap()
    }

    fn partial(worker_id: usize, processed: usize, inside: usize) -> Message {
        Message::Partial(PartialResult {
            worker_id,
            processed,
            inside,
        })
    }

    #[test]
    fn test_aggregation_sums_partials() {
        let mut agg = Aggregator::new(region(), 100, 2);
        agg.apply(partial(0, 60, 30));
        agg.apply(partial(1, 40, 20));

        let estimate = agg.finish().unwrap();
        assert_eq!(estimate.total_processed, 100);
        assert_eq!(estimate.total_inside, 50);
        assert_relative_eq!(estimate.area, 2.0);
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let msgs = [partial(0, 30, 10), partial(1, 30, 20), partial(2, 40, 15)];

        let mut forward = Aggregator::new(region(), 100, 3);
        for m in msgs {
            forward.apply(m);
        }
        let forward = forward.finish().unwrap();

        let mut reverse = Aggregator::new(region(), 100, 3);
        for m in msgs.into_iter().rev() {
            reverse.apply(m);
        }
        let reverse = reverse.finish().unwrap();

        assert_eq!(forward.total_inside, reverse.total_inside);
        assert_eq!(forward.total_processed, reverse.total_processed);
        assert_eq!(forward.area, reverse.area);
    }

    #[test]
    fn test_verbose_events_reconcile_with_partial() {
        let mut agg = Aggregator::new(region(), 10, 1);
        // Worker 0 streams 3 inside points, then reports 10 processed /
        // 3 inside. Totals must not double-count the streamed events.
        for _ in 0..3 {
            agg.apply(Message::InsidePoint {
                worker_id: 0,
                x: 0.5,
                y: 0.5,
            });
        }
        agg.apply(partial(0, 10, 3));

        let estimate = agg.finish().unwrap();
        assert_eq!(estimate.total_processed, 10);
        assert_eq!(estimate.total_inside, 3);
    }

    #[test]
    fn test_point_observer_sees_events() {
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut agg = Aggregator::new(region(), 10, 1).with_point_observer(Box::new(
            move |worker, p| {
                sink.lock().unwrap().push((worker, p));
            },
        ));

        agg.apply(Message::InsidePoint {
            worker_id: 0,
            x: 1.0,
            y: 0.5,
        });
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_progress_is_monotone() {
        use std::sync::{Arc, Mutex};

        let percents = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&percents);
        let mut agg =
            Aggregator::new(region(), 100, 2).with_progress(Box::new(move |p| {
                sink.lock().unwrap().push(p);
            }));

        agg.apply(partial(0, 50, 10));
        agg.apply(partial(1, 50, 10));

        let percents = percents.lock().unwrap();
        assert_eq!(*percents, vec![50, 100]);
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_missing_worker_is_partial_coverage() {
        let mut agg = Aggregator::new(region(), 100, 2);
        agg.apply(partial(0, 50, 25));

        match agg.finish() {
            Err(EngineError::PartialCoverage {
                expected,
                processed,
                failed_workers,
                estimate,
            }) => {
                assert_eq!(expected, 100);
                assert_eq!(processed, 50);
                assert_eq!(failed_workers, vec![1]);
                assert_eq!(estimate.total_inside, 25);
            }
            other => panic!("expected partial coverage, got {:?}", other.map(|e| e.area)),
        }
    }

    #[test]
    fn test_duplicate_partial_is_ignored() {
        let mut agg = Aggregator::new(region(), 100, 2);
        agg.apply(partial(0, 50, 25));
        agg.apply(partial(0, 50, 25));
        agg.apply(partial(1, 50, 25));

        let estimate = agg.finish().unwrap();
        assert_eq!(estimate.total_processed, 100);
        assert_eq!(estimate.total_inside, 50);
    }

    #[test]
    fn test_drain_collects_from_channels() {
        let (mut tx0, rx0) = channel();
        let (mut tx1, rx1) = channel();

        tx0.send(partial(0, 60, 30)).unwrap();
        tx1.send(partial(1, 40, 20)).unwrap();
        drop(tx0);
        drop(tx1);

        let mut agg = Aggregator::new(region(), 100, 2);
        agg.drain(vec![rx0, rx1], Duration::from_secs(1));
        assert!(agg.faults().is_empty());

        let estimate = agg.finish().unwrap();
        assert_eq!(estimate.total_processed, 100);
    }

    #[test]
    fn test_drain_times_out_on_silent_channel() {
        let (_tx_keepalive, rx) = channel();

        let mut agg = Aggregator::new(region(), 100, 1);
        agg.drain(vec![rx], Duration::from_millis(50));

        assert_eq!(agg.faults().len(), 1);
        assert!(matches!(
            agg.faults()[0],
            EngineError::WorkerTimeout { channel: 0 }
        ));
        assert!(matches!(
            agg.finish(),
            Err(EngineError::PartialCoverage { .. })
        ));
    }
}
