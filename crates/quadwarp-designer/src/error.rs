//! Error types for the designer crate.
//!
//! One enum per stage of an envelope run: path data parsing, document
//! handling, bounding-box measurement and the effect orchestration that ties
//! them together.

use quadwarp_core::{GeometryError, UnitError};
use std::io;
use thiserror::Error;

/// Errors raised while parsing SVG path data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Path data must start with a moveto.
    #[error("Path data must begin with a moveto command, found '{found}' at {position}")]
    MissingMoveTo { found: char, position: usize },

    /// A character that is neither a command nor part of a number.
    #[error("Unexpected character '{character}' at {position}")]
    UnexpectedCharacter { character: char, position: usize },

    /// A command ran out of numeric arguments.
    #[error("Command '{command}' expects a number at {position}")]
    ExpectedNumber { command: char, position: usize },

    /// An arc flag was not `0` or `1`.
    #[error("Arc flag must be 0 or 1 at {position}")]
    ExpectedFlag { position: usize },
}

/// Errors raised while reading or rewriting an SVG document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Malformed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute in an otherwise well-formed tag.
    #[error("Attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Output was not valid UTF-8.
    #[error("Document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// No `<svg>` root element.
    #[error("Document has no <svg> root element")]
    MissingRoot,

    /// Rewrite requested for an id the document does not contain.
    #[error("No element with id '{id}' to rewrite")]
    UnknownElement { id: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by a bounding-box provider.
#[derive(Error, Debug)]
pub enum MeasureError {
    /// The external query program could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The external query program exited unsuccessfully.
    #[error("'{program}' exited with {status} while querying {dimension}: {stderr}")]
    Status {
        program: String,
        dimension: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The external query printed something that is not a number.
    #[error("Could not parse {dimension} from query output '{output}'")]
    Parse {
        dimension: &'static str,
        output: String,
    },

    /// The path has no nodes to measure.
    #[error("Element '{id}' has no geometry to measure")]
    EmptyGeometry { id: String },

    /// A fixed box was requested but none is configured.
    #[error("No fixed bounding box configured")]
    MissingFixedBox,
}

/// Errors raised by the envelope effect.
#[derive(Error, Debug)]
pub enum EffectError {
    /// The selection does not name an object and a control path.
    #[error("{message}")]
    Selection { message: String },

    /// A selected id does not exist in the document.
    #[error("No element with id '{id}'")]
    MissingElement { id: String },

    /// A selected element is not a `<path>`.
    #[error("Element '{id}' is a <{tag}>, not a <path>")]
    NotAPath { id: String, tag: String },

    /// A selected path has no `d` attribute.
    #[error("Path '{id}' has no path data")]
    MissingPathData { id: String },

    /// The control path has fewer than four nodes.
    #[error("Control path '{id}' has {found} nodes, at least 4 are required")]
    NotEnoughCorners { id: String, found: usize },

    /// The document height is required to flip a bottom-up box but is absent.
    #[error("Document has no height attribute")]
    MissingHeight,

    /// Path data failed to parse.
    #[error("Invalid path data in '{id}': {source}")]
    Path {
        id: String,
        #[source]
        source: PathError,
    },

    /// The warp could not be computed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The document height did not parse.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// The bounding box could not be measured.
    #[error(transparent)]
    Measure(#[from] MeasureError),

    /// The document could not be read or written.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl EffectError {
    /// True for problems with what the user selected, as opposed to failures
    /// while processing a valid selection.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            EffectError::Selection { .. }
                | EffectError::MissingElement { .. }
                | EffectError::NotAPath { .. }
                | EffectError::NotEnoughCorners { .. }
        )
    }
}
