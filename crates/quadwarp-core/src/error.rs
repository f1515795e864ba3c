//! Error handling for QuadWarp
//!
//! Provides the error types shared by every layer of the workspace:
//! - Geometry errors (degenerate boxes, parallel intersections)
//! - Unit errors (length strings that do not parse)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised by the pure geometry primitives when their preconditions do not hold.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The source box has a zero (or non-finite) dimension
    #[error("Degenerate source box: width {width}, height {height}")]
    DegenerateSourceBox {
        /// Width of the rejected box.
        width: f64,
        /// Height of the rejected box.
        height: f64,
    },

    /// The two lines never meet
    #[error("Segments are parallel and do not intersect")]
    ParallelSegments,

    /// The two lines lie on top of each other
    #[error("Segments are coincident; intersection is not a single point")]
    CoincidentSegments,
}

/// Unit error type
///
/// Represents a length string that cannot be turned into user units.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// No numeric literal at the start of the string
    #[error("Invalid length '{input}': no leading number")]
    InvalidNumber {
        /// The rejected input.
        input: String,
    },

    /// A unit suffix outside the conversion table
    #[error("Unknown unit '{unit}' in length '{input}'")]
    UnknownUnit {
        /// The rejected input.
        input: String,
        /// The unrecognised suffix.
        unit: String,
    },
}

/// Main error type for QuadWarp
///
/// A unified error type for callers that do not care which layer failed.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Unit error
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a unit error
    pub fn is_unit_error(&self) -> bool {
        matches!(self, Error::Unit(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
