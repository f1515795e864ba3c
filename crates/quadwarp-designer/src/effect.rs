//! Envelope effect
//!
//! Warps the first selected path so that its bounding box lands on the
//! quadrilateral formed by the first four nodes of the second selected path.

use quadwarp_core::{parse_length, AxisOrientation, Quad, SourceBox};

use crate::bounds::BoundsProvider;
use crate::document::SvgDocument;
use crate::error::EffectError;
use crate::model::SuperPath;
use crate::warp::QuadWarp;

/// Shown when the selection does not name an object and a control path.
pub const SELECTION_MESSAGE: &str =
    "Requires two selected paths. The second must be exactly four nodes long.";

/// Summary of a completed envelope run.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectReport {
    pub object_id: String,
    pub control_id: String,
    /// Source box after any orientation flip
    pub source: SourceBox,
    pub quad: Quad,
    pub nodes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct EnvelopeEffect {
    selection: Vec<String>,
    precision: Option<usize>,
}

impl EnvelopeEffect {
    /// * `selection` - element ids in selection order: object, then control path
    pub fn new(selection: Vec<String>) -> Self {
        Self {
            selection,
            precision: None,
        }
    }

    /// Digits after the decimal point in the rewritten path data.
    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn run(
        &self,
        doc: &mut SvgDocument,
        bounds: &dyn BoundsProvider,
    ) -> Result<EffectReport, EffectError> {
        let (object_id, control_id) = match self.selection.as_slice() {
            [object, control, ..] => (object.as_str(), control.as_str()),
            _ => {
                return Err(EffectError::Selection {
                    message: SELECTION_MESSAGE.to_string(),
                })
            }
        };
        if self.selection.len() > 2 {
            tracing::debug!(
                ignored = self.selection.len() - 2,
                "extra selected ids are ignored"
            );
        }

        let object_data = path_data(doc, object_id)?;
        let control_data = path_data(doc, control_id)?;

        let control = parse(control_id, &control_data)?;
        let anchors = control.anchors();
        let quad = Quad::from_points(&anchors).ok_or_else(|| EffectError::NotEnoughCorners {
            id: control_id.to_string(),
            found: anchors.len(),
        })?;
        if anchors.len() > 4 {
            tracing::debug!(
                control = control_id,
                nodes = anchors.len(),
                "using the first four nodes of the control path"
            );
        }

        let mut object = parse(object_id, &object_data)?;
        let measured = bounds.measure(object_id, &object)?;
        let source = match measured.orientation {
            AxisOrientation::TopDown => measured.rect,
            AxisOrientation::BottomUp => {
                let height = doc.height().ok_or(EffectError::MissingHeight)?;
                let height = parse_length(height)?.to_user_units();
                tracing::debug!(document_height = height, "flipping bottom-up box");
                measured.rect.flipped(height)
            }
        };

        let warp = QuadWarp::new(source, quad)?;
        warp.warp_path(&mut object)?;
        doc.set_path_data(object_id, object.to_path_data(self.precision))?;

        let report = EffectReport {
            object_id: object_id.to_string(),
            control_id: control_id.to_string(),
            source,
            quad,
            nodes: object.node_count(),
        };
        tracing::info!(
            object = object_id,
            control = control_id,
            source = %report.source,
            nodes = report.nodes,
            "envelope applied"
        );
        Ok(report)
    }
}

/// The `d` attribute of the path element `id`.
fn path_data(doc: &SvgDocument, id: &str) -> Result<String, EffectError> {
    let element = doc
        .element(id)
        .ok_or_else(|| EffectError::MissingElement { id: id.to_string() })?;
    if !element.is_path() {
        return Err(EffectError::NotAPath {
            id: id.to_string(),
            tag: element.tag.clone(),
        });
    }
    element
        .path_data
        .clone()
        .ok_or_else(|| EffectError::MissingPathData { id: id.to_string() })
}

fn parse(id: &str, data: &str) -> Result<SuperPath, EffectError> {
    SuperPath::parse(data).map_err(|source| EffectError::Path {
        id: id.to_string(),
        source,
    })
}
