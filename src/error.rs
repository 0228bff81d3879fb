//! Error types for shape construction and shape-pair dispatch.

use thiserror::Error;

use crate::shapes::ShapeType;

/// Result type for shape construction.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Result type for narrow-phase dispatch.
pub type CollisionResult<T> = Result<T, CollisionError>;

/// Errors raised while validating shape parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// Polygon has fewer vertices than a closed convex hull needs.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Polygon exceeds the vertex limit.
    #[error("polygon supports at most {max} vertices, got {count}")]
    TooManyVertices {
        /// Vertices supplied.
        count: usize,
        /// Configured limit.
        max: usize,
    },

    /// A coordinate or parameter is NaN or infinite.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// Two consecutive vertices coincide.
    #[error("edge {0} is degenerate")]
    DegenerateEdge(usize),

    /// Vertices are not convex or not wound counter-clockwise.
    #[error("polygon is not convex and counter-clockwise at vertex {0}")]
    NotConvex(usize),

    /// Radius is negative.
    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(f64),

    /// Gradient step is zero, negative or non-finite.
    #[error("gradient step must be positive, got {0}")]
    InvalidGradientStep(f64),

    /// March tolerance is zero, negative or non-finite.
    #[error("march tolerance must be positive, got {0}")]
    InvalidMarchTolerance(f64),

    /// Ray marching was given no iterations.
    #[error("max march steps must be at least 1")]
    NoMarchSteps,

    /// Bounding box has lower > upper on some axis.
    #[error("bounds are inverted")]
    InvertedBounds,
}

/// Errors raised by the shape-pair dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollisionError {
    /// No narrow-phase routine exists for this ordered pair.
    #[error("no narrow-phase routine for {a:?} vs {b:?}")]
    UnsupportedPair {
        /// Variant of shape A.
        a: ShapeType,
        /// Variant of shape B.
        b: ShapeType,
    },
}
