//! Workload partitioning.
//!
//! Splits the sample index space `[0, total_points)` into contiguous,
//! disjoint, exhaustive shares, one per worker.

use crate::error::ConfigError;

/// A contiguous slice of the sample index space assigned to one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Share {
    /// Identifier of the worker owning this share.
    pub worker_id: usize,
    /// First sample index of the share.
    pub start: usize,
    /// Number of samples in the share.
    pub count: usize,
}

/// Splits `total_points` across `worker_count` shares.
///
/// The remainder is spread one extra point each over the first
/// `total_points % worker_count` workers, so no share is ever smaller
/// than `total_points / worker_count`.
///
/// # Errors
///
/// Returns `ConfigError` if either argument is zero.
///
/// # Examples
///
/// ```rust
/// use estimator_engine::partition::partition;
///
/// let shares = partition(10, 3).unwrap();
/// let counts: Vec<usize> = shares.iter().map(|s| s.count).collect();
/// assert_eq!(counts, vec![4, 3, 3]);
/// assert_eq!(shares.iter().map(|s| s.count).sum::<usize>(), 10);
/// ```
pub fn partition(total_points: usize, worker_count: usize) -> Result<Vec<Share>, ConfigError> {
    if worker_count == 0 {
        return Err(ConfigError::InvalidWorkerCount(worker_count));
    }
    if total_points == 0 {
        return Err(ConfigError::InvalidPointCount(total_points));
    }

    let base = total_points / worker_count;
    let remainder = total_points % worker_count;

    let mut shares = Vec::with_capacity(worker_count);
    let mut start = 0;
    for worker_id in 0..worker_count {
        let count = base + usize::from(worker_id < remainder);
        shares.push(Share {
            worker_id,
            start,
            count,
        });
        start += count;
    }

    Ok(shares)
}
