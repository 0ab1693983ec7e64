//! Property tests for the ray-casting membership test.

use estimator_core::geometry::Polygon;
use estimator_core::types::Point;
use proptest::prelude::*;

fn unit_square() -> Polygon {
    Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ])
    .unwrap()
}

proptest! {
    /// Any point strictly outside the polygon's bounding box is outside
    /// the polygon.
    #[test]
    fn outside_bounding_box_is_outside(x in -10.0..10.0f64, y in -10.0..10.0f64) {
        let square = unit_square();
        prop_assume!(x < 0.0 || x > 1.0 || y < 0.0 || y > 1.0);
        prop_assert!(!square.contains(Point::new(x, y)));
    }

    /// For a convex polygon, membership matches the half-plane answer:
    /// strictly interior points of the square are reported inside.
    #[test]
    fn interior_of_square_is_inside(x in 0.001..0.999f64, y in 0.001..0.999f64) {
        let square = unit_square();
        prop_assert!(square.contains(Point::new(x, y)));
    }

    /// Membership is pure: repeated calls agree.
    #[test]
    fn membership_is_deterministic(x in -2.0..3.0f64, y in -2.0..3.0f64) {
        let square = unit_square();
        let p = Point::new(x, y);
        prop_assert_eq!(square.contains(p), square.contains(p));
    }
}
