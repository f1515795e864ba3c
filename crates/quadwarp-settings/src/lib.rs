//! QuadWarp Settings Crate
//!
//! Loads, validates and saves the application configuration.

pub mod config;
pub mod error;

pub use config::{
    BoundsSettings, BoundsSource, Config, LogFormat, LoggingSettings, OutputSettings,
    MAX_PRECISION,
};
pub use error::{SettingsError, SettingsResult};
