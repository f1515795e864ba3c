//! Bounding-box measurement.
//!
//! The warp needs the source box of the object path. Where that box comes
//! from is pluggable: computed from the parsed geometry, fixed by
//! configuration, or queried from an external Inkscape process.

use std::path::PathBuf;
use std::process::Command;

use quadwarp_core::{AxisOrientation, SourceBox};

use crate::error::MeasureError;
use crate::model::SuperPath;

/// A box together with the frame it was measured in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredBox {
    pub rect: SourceBox,
    pub orientation: AxisOrientation,
}

impl MeasuredBox {
    pub fn top_down(rect: SourceBox) -> Self {
        Self {
            rect,
            orientation: AxisOrientation::TopDown,
        }
    }

    pub fn bottom_up(rect: SourceBox) -> Self {
        Self {
            rect,
            orientation: AxisOrientation::BottomUp,
        }
    }
}

/// Source of the object's bounding box.
pub trait BoundsProvider {
    /// Measure the element `id`, whose parsed geometry is `path`.
    fn measure(&self, id: &str, path: &SuperPath) -> Result<MeasuredBox, MeasureError>;
}

/// Tight bounds of the parsed path geometry, in path coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryBounds;

impl BoundsProvider for GeometryBounds {
    fn measure(&self, id: &str, path: &SuperPath) -> Result<MeasuredBox, MeasureError> {
        path.bounds()
            .map(MeasuredBox::top_down)
            .ok_or_else(|| MeasureError::EmptyGeometry { id: id.to_string() })
    }
}

/// A predetermined box, reported regardless of the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedBounds(pub MeasuredBox);

impl FixedBounds {
    pub fn new(rect: SourceBox, orientation: AxisOrientation) -> Self {
        Self(MeasuredBox { rect, orientation })
    }
}

impl BoundsProvider for FixedBounds {
    fn measure(&self, _id: &str, _path: &SuperPath) -> Result<MeasuredBox, MeasureError> {
        Ok(self.0)
    }
}

/// Asks an Inkscape executable for the visual bounding box of an element.
///
/// Runs `<program> --query-<dim> --query-id=<id> <document>` once for each of
/// `x`, `y`, `width` and `height`. Each call blocks until the child exits.
#[derive(Debug, Clone)]
pub struct InkscapeQuery {
    pub program: String,
    pub document: PathBuf,
    pub orientation: AxisOrientation,
}

impl InkscapeQuery {
    /// Query `document` with `program`, reporting boxes in the bottom-up
    /// desktop frame.
    pub fn new(program: impl Into<String>, document: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            document: document.into(),
            orientation: AxisOrientation::BottomUp,
        }
    }

    pub fn with_orientation(mut self, orientation: AxisOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    fn query(&self, id: &str, dimension: &'static str) -> Result<f64, MeasureError> {
        tracing::debug!(program = %self.program, id, dimension, "querying bounding box");

        let output = Command::new(&self.program)
            .arg(format!("--query-{}", dimension))
            .arg(format!("--query-id={}", id))
            .arg(&self.document)
            .output()
            .map_err(|source| MeasureError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(MeasureError::Status {
                program: self.program.clone(),
                dimension,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_query_output(dimension, &String::from_utf8_lossy(&output.stdout))
    }
}

impl BoundsProvider for InkscapeQuery {
    fn measure(&self, id: &str, _path: &SuperPath) -> Result<MeasuredBox, MeasureError> {
        let x = self.query(id, "x")?;
        let y = self.query(id, "y")?;
        let width = self.query(id, "width")?;
        let height = self.query(id, "height")?;
        Ok(MeasuredBox {
            rect: SourceBox::new(x, y, width, height),
            orientation: self.orientation,
        })
    }
}

/// Parse the single number a `--query-*` call prints.
fn parse_query_output(dimension: &'static str, output: &str) -> Result<f64, MeasureError> {
    let trimmed = output.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MeasureError::Parse {
            dimension,
            output: trimmed.to_string(),
        })
}
