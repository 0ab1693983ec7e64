//! # estimator_core: Geometry Foundation for Monte-Carlo Area Estimation
//!
//! ## Layer 1 (Foundation) Role
//!
//! estimator_core is the bottom layer of the workspace, providing:
//! - Point and orientation predicates (`geometry::predicates`)
//! - Polygon type with ray-casting membership test (`geometry::polygon`)
//! - Axis-aligned bounding regions (`geometry::region`)
//! - Error types: `GeometryError` (`types::error`)
//!
//! Everything in this crate is pure and deterministic: the same inputs
//! always produce the same answer, with no hidden state. The sampling
//! engine (`estimator_engine`) builds on these primitives.
//!
//! ## Usage Examples
//!
//! ```rust
//! use estimator_core::geometry::{BoundingRegion, Polygon};
//! use estimator_core::types::Point;
//!
//! let square = Polygon::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(2.0, 0.0),
//!     Point::new(2.0, 2.0),
//!     Point::new(0.0, 2.0),
//! ])
//! .unwrap();
//!
//! assert!(square.contains(Point::new(1.0, 1.0)));
//! assert!(!square.contains(Point::new(3.0, 1.0)));
//!
//! let region = BoundingRegion::new(0.0, 2.0, 0.0, 2.0).unwrap();
//! assert_eq!(region.area(), 4.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod geometry;
pub mod types;

pub use geometry::{BoundingRegion, Polygon};
pub use types::{GeometryError, Point};
