//! Polygon type and ray-casting membership test.

use crate::geometry::predicates::{on_segment, orientation, segments_intersect, Orientation};
use crate::geometry::region::BoundingRegion;
use crate::types::{GeometryError, Point};

/// A simple polygon given as an ordered vertex sequence, implicitly
/// closed (an edge joins the last vertex back to the first).
///
/// Simplicity (no self-intersections) is assumed, not verified;
/// degenerate inputs such as collinear triples are handled by the
/// membership test's tie-break rules rather than rejected. Vertices are
/// immutable after construction, so a polygon can be shared by reference
/// across any number of worker threads.
///
/// # Examples
/// ```
/// use estimator_core::geometry::Polygon;
/// use estimator_core::types::Point;
///
/// let triangle = Polygon::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(4.0, 0.0),
///     Point::new(2.0, 3.0),
/// ])
/// .unwrap();
///
/// assert!(triangle.contains(Point::new(2.0, 1.0)));
/// assert!(!triangle.contains(Point::new(0.0, 3.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    // Cached at construction; contains() derives its ray endpoint from it.
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] for fewer than 3 vertices.
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                got: vertices.len(),
            });
        }

        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for v in &vertices {
            x_min = x_min.min(v.x);
            x_max = x_max.max(v.x);
            y_min = y_min.min(v.y);
            y_max = y_max.max(v.y);
        }

        Ok(Self {
            vertices,
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Parses a polygon from whitespace-separated `x y` coordinate pairs,
    /// one vertex per line.
    ///
    /// Lines that do not contain two parseable floats are skipped; at
    /// least three valid records are required.
    ///
    /// # Errors
    ///
    /// [`GeometryError::NoValidVertices`] when nothing parses,
    /// [`GeometryError::TooFewVertices`] when fewer than 3 records do.
    ///
    /// # Examples
    /// ```
    /// use estimator_core::geometry::Polygon;
    ///
    /// let poly = Polygon::parse("0 0\n2 0\n2 2\n0 2\n").unwrap();
    /// assert_eq!(poly.vertex_count(), 4);
    /// ```
    pub fn parse(text: &str) -> Result<Self, GeometryError> {
        let mut vertices = Vec::new();
        for line in text.lines() {
            let mut fields = line.split_whitespace();
            let (Some(xs), Some(ys)) = (fields.next(), fields.next()) else {
                continue;
            };
            if let (Ok(x), Ok(y)) = (xs.parse::<f64>(), ys.parse::<f64>()) {
                vertices.push(Point::new(x, y));
            }
        }

        if vertices.is_empty() {
            return Err(GeometryError::NoValidVertices);
        }
        Self::new(vertices)
    }

    /// Returns the vertices in order.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The polygon's axis-aligned bounding box.
    ///
    /// Always non-degenerate for polygons with positive extent; a fully
    /// collinear "polygon" yields a zero-width box, which `contains`
    /// still handles via the on-segment tie-break.
    pub fn bounding_box(&self) -> (Point, Point) {
        (
            Point::new(self.x_min, self.y_min),
            Point::new(self.x_max, self.y_max),
        )
    }

    /// Smallest [`BoundingRegion`] enclosing the polygon, grown by
    /// `margin` on every side.
    ///
    /// # Errors
    ///
    /// Propagates [`GeometryError::EmptyRegion`] for degenerate polygons
    /// with a non-positive margin.
    pub fn enclosing_region(&self, margin: f64) -> Result<BoundingRegion, GeometryError> {
        BoundingRegion::new(
            self.x_min - margin,
            self.x_max + margin,
            self.y_min - margin,
            self.y_max + margin,
        )
    }

    /// Ray-casting membership test.
    ///
    /// Casts a horizontal ray from `p` to `(x_max + 1, p.y)`, which is
    /// strictly outside the polygon's bounding box, and counts
    /// edge crossings; odd means inside. A test point exactly collinear
    /// with an edge resolves to the on-segment check for that edge, so
    /// boundary points are classified inside. That convention is a design
    /// choice, not an accident of the crossing count.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        // Cheap reject before walking the edges.
        if p.x < self.x_min || p.x > self.x_max || p.y < self.y_min || p.y > self.y_max {
            return false;
        }

        let far = Point::new(self.x_max + 1.0, p.y);

        let mut count = 0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];

            if segments_intersect(a, b, p, far) {
                if orientation(a, p, b) == Orientation::Collinear {
                    return on_segment(a, p, b);
                }
                count += 1;
            }
        }

        count % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn unit_square() -> Polygon {
        Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_new_rejects_too_few_vertices() {
        let result = Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0)]);
        assert!(matches!(
            result,
            Err(GeometryError::TooFewVertices { got: 2 })
        ));
    }

    #[test]
    fn test_unit_square_membership() {
        let square = unit_square();
        assert!(square.contains(p(0.5, 0.5)));
        assert!(!square.contains(p(1.5, 0.5)));
    }

    #[test]
    fn test_boundary_point_is_inside() {
        let square = unit_square();
        assert!(square.contains(p(1.0, 0.5)));
        assert!(square.contains(p(0.5, 0.0)));
        assert!(square.contains(p(0.0, 0.0)));
    }

    #[test]
    fn test_point_outside_bounding_box() {
        let square = unit_square();
        assert!(!square.contains(p(-0.1, 0.5)));
        assert!(!square.contains(p(0.5, 2.0)));
        assert!(!square.contains(p(0.5, -1.0)));
    }

    #[test]
    fn test_concave_polygon() {
        // A "U" shape: the notch between the arms is outside.
        let u = Polygon::new(vec![
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 3.0),
            p(2.0, 3.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
        ])
        .unwrap();

        assert!(u.contains(p(0.5, 2.0)));
        assert!(u.contains(p(2.5, 2.0)));
        assert!(!u.contains(p(1.5, 2.0)));
        assert!(u.contains(p(1.5, 0.5)));
    }

    #[test]
    fn test_polygon_far_from_origin() {
        // The ray endpoint is derived from the bounding box, so polygons
        // well outside [0, 2] still test correctly.
        let square = Polygon::new(vec![
            p(100.0, 100.0),
            p(102.0, 100.0),
            p(102.0, 102.0),
            p(100.0, 102.0),
        ])
        .unwrap();

        assert!(square.contains(p(101.0, 101.0)));
        assert!(!square.contains(p(99.0, 101.0)));
        assert!(!square.contains(p(103.0, 101.0)));
    }

    #[test]
    fn test_contains_is_pure() {
        let square = unit_square();
        let q = p(0.3, 0.8);
        assert_eq!(square.contains(q), square.contains(q));
    }

    #[test]
    fn test_bounding_box() {
        let tri = Polygon::new(vec![p(-1.0, 0.0), p(2.0, -3.0), p(0.5, 4.0)]).unwrap();
        let (lo, hi) = tri.bounding_box();
        assert_eq!(lo, p(-1.0, -3.0));
        assert_eq!(hi, p(2.0, 4.0));
    }

    #[test]
    fn test_enclosing_region() {
        let square = unit_square();
        let region = square.enclosing_region(0.5).unwrap();
        assert_eq!(region.x_min(), -0.5);
        assert_eq!(region.x_max(), 1.5);
        assert_eq!(region.area(), 4.0);
    }

    #[test]
    fn test_parse_valid_input() {
        let poly = Polygon::parse("0 0\n2 0\n2 2\n0 2\n").unwrap();
        assert_eq!(poly.vertex_count(), 4);
        assert!(poly.contains(p(1.0, 1.0)));
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let poly = Polygon::parse("0 0\nnot a vertex\n2 0\n# comment\n2 2\n0 2\n").unwrap();
        assert_eq!(poly.vertex_count(), 4);
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(matches!(
            Polygon::parse("garbage\n"),
            Err(GeometryError::NoValidVertices)
        ));
    }

    #[test]
    fn test_parse_rejects_two_vertices() {
        assert!(matches!(
            Polygon::parse("0 0\n1 1\n"),
            Err(GeometryError::TooFewVertices { got: 2 })
        ));
    }
}
