//! Error types for the core crate.

use thiserror::Error;

/// Errors raised by the pure geometry helpers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A polygon needs at least three corners.
    #[error("A regular polygon needs at least 3 corners, got {0}")]
    TooFewCorners(usize),

    /// A size or length must be strictly positive.
    #[error("'{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

/// Result type alias for geometry helpers.
pub type GeometryResult<T> = Result<T, GeometryError>;
