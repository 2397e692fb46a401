//! Runtime configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! TOML file, command-line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Language;

pub const DEFAULT_DATA_PATH: &str = "data/greece_regions.geojson";
pub const DEFAULT_FEEDBACK_MS: u64 = 1500;
const FEEDBACK_MS_RANGE: std::ops::RangeInclusive<u64> = 100..=10_000;

/// How much the map view may be manipulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    /// Fixed viewport; regions can still be clicked.
    Static,
    /// Zoom in and out around the cursor.
    #[default]
    Interactive,
}

impl Interaction {
    pub fn allows_zoom(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("feedback delay must be between 100 and 10000 ms, got {0}")]
    FeedbackDelay(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// GeoJSON feature collection with the regions.
    pub data: PathBuf,
    pub language: Language,
    pub interaction: Interaction,
    /// How long a wrong answer stays highlighted.
    pub feedback_ms: u64,
    /// Fixed seed for reproducible prompts.
    pub seed: Option<u64>,
    /// Where to write logs. No file, no logs.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: PathBuf::from(DEFAULT_DATA_PATH),
            language: Language::default(),
            interaction: Interaction::default(),
            feedback_ms: DEFAULT_FEEDBACK_MS,
            seed: None,
            log_file: None,
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data: Option<PathBuf>,
    pub language: Option<Language>,
    pub interaction: Option<Interaction>,
    pub feedback_ms: Option<u64>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load a TOML config file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(data) = overrides.data {
            self.data = data;
        }
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if let Some(interaction) = overrides.interaction {
            self.interaction = interaction;
        }
        if let Some(feedback_ms) = overrides.feedback_ms {
            self.feedback_ms = feedback_ms;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.log_file.is_some() {
            self.log_file = overrides.log_file;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !FEEDBACK_MS_RANGE.contains(&self.feedback_ms) {
            return Err(ConfigError::FeedbackDelay(self.feedback_ms));
        }
        Ok(())
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}
