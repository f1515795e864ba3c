//! Command-line front end
//!
//! Mirrors the calling convention of an editor extension: the selection is
//! passed as repeated `--id` options, the document path comes last and the
//! resulting document is written to stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quadwarp_core::AxisOrientation;
use quadwarp_designer::{
    BoundsProvider, EffectError, EffectReport, EnvelopeEffect, FixedBounds, GeometryBounds,
    InkscapeQuery, MeasureError, SvgDocument,
};
use quadwarp_settings::{BoundsSource, Config, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "quadwarp")]
#[command(about = "Warp an SVG path so its bounding box fits a four-node control path", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Selected element id; give the path to warp first, then the control path
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<String>,

    /// Configuration file (.toml or .json)
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Where the bounding box comes from: geometry, inkscape or fixed
    #[arg(long, value_name = "SOURCE")]
    pub bounds: Option<BoundsSource>,

    /// Inkscape executable used for bounding-box queries
    #[arg(long, value_name = "PROGRAM")]
    pub inkscape: Option<String>,

    /// Digits after the decimal point in the rewritten path data
    #[arg(long, value_name = "N")]
    pub precision: Option<usize>,

    /// Write the document here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log format on stderr: pretty or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// SVG document to modify
    #[arg(value_name = "DOCUMENT", value_hint = clap::ValueHint::FilePath)]
    pub document: PathBuf,
}

/// How a run ended when no hard failure occurred.
#[derive(Debug)]
pub enum Outcome {
    /// The object was warped and the modified document written.
    Applied(EffectReport),
    /// The selection was unusable; the document was written back unchanged.
    Rejected(EffectError),
}

impl Cli {
    /// Resolve the configuration: the `--config` file or the user config,
    /// with command-line flags taking precedence.
    pub fn settings(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::load_default()?,
        };

        if let Some(source) = self.bounds {
            config.bounds.source = source;
        }
        if let Some(program) = &self.inkscape {
            config.bounds.inkscape_program = program.clone();
        }
        if self.precision.is_some() {
            config.output.precision = self.precision;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }

        config.validate()?;
        Ok(config)
    }

    fn bounds_provider(&self, config: &Config) -> Result<Box<dyn BoundsProvider>> {
        let provider: Box<dyn BoundsProvider> = match config.bounds.source {
            BoundsSource::Geometry => Box::new(GeometryBounds),
            BoundsSource::Inkscape => Box::new(
                InkscapeQuery::new(config.bounds.inkscape_program.clone(), self.document.clone())
                    .with_orientation(config.bounds.orientation),
            ),
            BoundsSource::Fixed => {
                let rect = config.bounds.fixed.ok_or(MeasureError::MissingFixedBox)?;
                Box::new(FixedBounds::new(rect, AxisOrientation::TopDown))
            }
        };
        Ok(provider)
    }

    fn write_document(&self, text: &str) -> Result<()> {
        match &self.output {
            Some(path) => std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// Apply the envelope to the document named on the command line.
///
/// Selection problems are not failures: the unmodified document is still
/// written so an editor host gets its document back, and the problem is
/// returned as [`Outcome::Rejected`].
pub fn run(cli: &Cli, config: &Config) -> Result<Outcome> {
    let mut doc = SvgDocument::load(&cli.document)
        .with_context(|| format!("Failed to read {}", cli.document.display()))?;
    let provider = cli.bounds_provider(config)?;

    tracing::debug!(
        document = %cli.document.display(),
        width = doc.width().unwrap_or("-"),
        height = doc.height().unwrap_or("-"),
        ids = ?cli.ids,
        bounds = %config.bounds.source,
        "running envelope"
    );

    let effect = EnvelopeEffect::new(cli.ids.clone()).with_precision(config.output.precision);
    match effect.run(&mut doc, provider.as_ref()) {
        Ok(report) => {
            cli.write_document(&doc.render()?)?;
            Ok(Outcome::Applied(report))
        }
        Err(err) if err.is_user_error() => {
            tracing::warn!(error = %err, "selection rejected, document left unchanged");
            cli.write_document(&doc.render()?)?;
            Ok(Outcome::Rejected(err))
        }
        Err(err) => Err(err.into()),
    }
}
