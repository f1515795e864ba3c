//! # QuadWarp Designer
//!
//! Path-level machinery for the envelope warp: the cubic super-path model
//! and its SVG path-data parser, the quadrilateral warp engine, a minimal SVG
//! document model, bounding-box providers and the effect that ties them
//! together.
//!
//! ## Architecture
//!
//! ```text
//! SvgDocument (find elements by id, rewrite `d`)
//!   └── EnvelopeEffect
//!         ├── SuperPath::parse (object + control path)
//!         ├── BoundsProvider (geometry / fixed / inkscape query)
//!         └── QuadWarp (bilinear box -> quad mapping)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quadwarp_designer::{EnvelopeEffect, GeometryBounds, SvgDocument};
//!
//! let mut doc = SvgDocument::load("drawing.svg")?;
//! let effect = EnvelopeEffect::new(vec!["object".into(), "trapezoid".into()]);
//! effect.run(&mut doc, &GeometryBounds)?;
//! print!("{}", doc.render()?);
//! ```

pub mod bounds;
pub mod document;
pub mod effect;
pub mod error;
pub mod model;
pub mod warp;

pub use bounds::{BoundsProvider, FixedBounds, GeometryBounds, InkscapeQuery, MeasuredBox};
pub use document::{SvgDocument, SvgElement};
pub use effect::{EffectReport, EnvelopeEffect, SELECTION_MESSAGE};
pub use error::{DocumentError, EffectError, MeasureError, PathError};
pub use model::{Node, PointTransform, Subpath, SuperPath};
pub use warp::{warp, QuadWarp};
