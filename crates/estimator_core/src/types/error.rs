//! Error types for geometry construction and parsing.

use thiserror::Error;

/// Errors raised while constructing or parsing geometry inputs.
///
/// These are startup-time failures: they are surfaced to the caller
/// before any sampling work begins.
///
/// # Examples
/// ```
/// use estimator_core::types::GeometryError;
///
/// let err = GeometryError::TooFewVertices { got: 2 };
/// assert!(err.to_string().contains("at least 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A polygon needs at least three vertices.
    #[error("invalid polygon: got {got} vertices, need at least 3")]
    TooFewVertices {
        /// Number of vertices provided.
        got: usize,
    },

    /// No parseable `x y` coordinate pair was found in the input.
    #[error("invalid polygon: no valid coordinate records in input")]
    NoValidVertices,

    /// A bounding region must have positive extent on both axes.
    #[error("empty bounding region: [{x_min}, {x_max}] x [{y_min}, {y_max}]")]
    EmptyRegion {
        /// Left edge.
        x_min: f64,
        /// Right edge.
        x_max: f64,
        /// Bottom edge.
        y_min: f64,
        /// Top edge.
        y_max: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_vertices_display() {
        let err = GeometryError::TooFewVertices { got: 1 };
        assert_eq!(
            err.to_string(),
            "invalid polygon: got 1 vertices, need at least 3"
        );
    }

    #[test]
    fn test_empty_region_display() {
        let err = GeometryError::EmptyRegion {
            x_min: 1.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 2.0,
        };
        assert!(err.to_string().contains("empty bounding region"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = GeometryError::NoValidVertices;
        let _: &dyn std::error::Error = &err;
    }
}
