//! # QuadWarp
//!
//! Envelope warp for SVG documents: remaps a path so that its bounding box
//! lands on the quadrilateral formed by the first four nodes of a second
//! "control" path.
//!
//! ## Architecture
//!
//! QuadWarp is organized as a workspace with multiple crates:
//!
//! 1. **quadwarp-core** - Geometry primitives, unit parsing, errors
//! 2. **quadwarp-designer** - Path model, warp engine, SVG document, bounds providers
//! 3. **quadwarp-settings** - Configuration files and validation
//! 4. **quadwarp** - Command-line binary that wires them together

pub mod cli;

pub use cli::{run, Cli, Outcome};

pub use quadwarp_core::{AxisOrientation, Error, Point, Quad, Result, Segment, SourceBox};
pub use quadwarp_designer::{
    BoundsProvider, EffectError, EffectReport, EnvelopeEffect, GeometryBounds, QuadWarp,
    SuperPath, SvgDocument,
};
pub use quadwarp_settings::{Config, LogFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr, leaving stdout free for the
/// document:
/// - `RUST_LOG` environment variable support, falling back to `level`
/// - Pretty or JSON output
pub fn init_logging(format: LogFormat, level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();
            registry.with(fmt_layer).try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();
            registry.with(fmt_layer).try_init()?;
        }
    }

    Ok(())
}
