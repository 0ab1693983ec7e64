//! Orientation and segment-intersection predicates.
//!
//! These are the classical cross-product tests underpinning the
//! ray-casting membership check in [`crate::geometry::Polygon`]. All of
//! them are pure functions over [`Point`] values.

use crate::types::Point;

/// Turn direction of an ordered point triplet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The three points lie on a single line.
    Collinear,
    /// Traversing p -> q -> r turns right.
    Clockwise,
    /// Traversing p -> q -> r turns left.
    CounterClockwise,
}

/// Determines the orientation of the ordered triplet `(p, q, r)`.
///
/// Computed as the sign of the cross product
/// `(q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)`.
///
/// The collinear case is an exact floating-point zero compare: points
/// that are only approximately collinear may be classified either way.
/// Callers near degenerate inputs must accept either answer.
///
/// # Examples
/// ```
/// use estimator_core::geometry::{orientation, Orientation};
/// use estimator_core::types::Point;
///
/// let o = orientation(
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(2.0, 0.0),
/// );
/// assert_eq!(o, Orientation::Collinear);
/// ```
#[inline]
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);

    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Checks whether `q` lies within the axis-aligned bounding box of the
/// segment `pr`.
///
/// Assumes the caller has already established that `p`, `q` and `r` are
/// collinear; on its own this is only a box test.
#[inline]
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Checks whether segments `p1q1` and `p2q2` intersect.
///
/// True when the endpoints of each segment straddle the other (opposite
/// orientations on both sides), or when an endpoint is collinear with and
/// lies on the other segment. Touching and overlapping segments count as
/// intersecting.
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear endpoint lying on the other segment
    if o1 == Orientation::Collinear && on_segment(p1, p2, q1) {
        return true;
    }
    if o2 == Orientation::Collinear && on_segment(p1, q2, q1) {
        return true;
    }
    if o3 == Orientation::Collinear && on_segment(p2, p1, q2) {
        return true;
    }
    if o4 == Orientation::Collinear && on_segment(p2, q1, q2) {
        return true;
    }

    false
}
