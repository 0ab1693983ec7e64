//! Planar geometry: orientation predicates, segment intersection,
//! polygons and bounding regions.

pub mod polygon;
pub mod predicates;
pub mod region;

pub use polygon::Polygon;
pub use predicates::{on_segment, orientation, segments_intersect, Orientation};
pub use region::BoundingRegion;
