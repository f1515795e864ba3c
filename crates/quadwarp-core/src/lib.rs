//! # QuadWarp Core
//!
//! Core types and utilities for QuadWarp.
//! Provides the geometry primitives the warp engine is built on, SVG length
//! unit parsing and the shared error taxonomy.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{Error, GeometryError, Result, UnitError};
pub use geometry::{AxisOrientation, Point, Quad, Segment, SourceBox};
pub use units::{parse_length, unittouu, Length, LengthUnit};
