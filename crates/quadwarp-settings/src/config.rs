//! Configuration file model
//!
//! Settings are read from JSON or TOML, chosen by file extension. Every
//! section has defaults, so a file only needs the keys it changes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use quadwarp_core::{AxisOrientation, SourceBox};
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Largest number of fractional digits that still changes an `f64`
pub const MAX_PRECISION: usize = 17;

/// Where the source bounding box comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsSource {
    /// Computed from the parsed path geometry
    #[default]
    Geometry,
    /// Queried from an external inkscape process
    Inkscape,
    /// Taken from `bounds.fixed`
    Fixed,
}

impl fmt::Display for BoundsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry => write!(f, "geometry"),
            Self::Inkscape => write!(f, "inkscape"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

impl FromStr for BoundsSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "geometry" => Ok(Self::Geometry),
            "inkscape" => Ok(Self::Inkscape),
            "fixed" => Ok(Self::Fixed),
            _ => Err(format!(
                "Unknown bounds source '{}' (expected geometry, inkscape or fixed)",
                s
            )),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format '{}' (expected pretty or json)", s)),
        }
    }
}

/// Bounding-box measurement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsSettings {
    pub source: BoundsSource,
    /// Executable used when `source` is `inkscape`
    pub inkscape_program: String,
    /// Frame the inkscape query reports its boxes in
    pub orientation: AxisOrientation,
    /// Box used when `source` is `fixed`, in document user units
    pub fixed: Option<SourceBox>,
}

impl Default for BoundsSettings {
    fn default() -> Self {
        Self {
            source: BoundsSource::default(),
            inkscape_program: "inkscape".to_string(),
            orientation: AxisOrientation::BottomUp,
            fixed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Digits after the decimal point in rewritten path data; unset keeps
    /// the shortest exact form
    pub precision: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// Default filter directive when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: "info".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bounds: BoundsSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform location of the user config file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quadwarp").join("config.toml"))
    }

    /// Load the user config file when it exists, otherwise defaults
    pub fn load_default() -> SettingsResult<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => {
                tracing::debug!("no user config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(SettingsError::LoadError(
                    "Config file must be .json or .toml".to_string(),
                ))
            }
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => {
                return Err(SettingsError::SaveError(
                    "Config file must be .json or .toml".to_string(),
                ))
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.bounds.inkscape_program.trim().is_empty() {
            return Err(SettingsError::invalid(
                "bounds.inkscape_program",
                "must not be empty",
            ));
        }

        match (self.bounds.source, self.bounds.fixed) {
            (BoundsSource::Fixed, None) => {
                return Err(SettingsError::invalid(
                    "bounds.fixed",
                    "required when bounds.source is 'fixed'",
                ))
            }
            (_, Some(rect)) => {
                rect.validate()
                    .map_err(|e| SettingsError::invalid("bounds.fixed", e.to_string()))?;
            }
            _ => {}
        }

        if let Some(precision) = self.output.precision {
            if precision > MAX_PRECISION {
                return Err(SettingsError::invalid(
                    "output.precision",
                    format!("must be at most {}", MAX_PRECISION),
                ));
            }
        }

        if self.logging.level.trim().is_empty() {
            return Err(SettingsError::invalid("logging.level", "must not be empty"));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
