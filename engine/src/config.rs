use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::ConfigError;
use crate::palette::{AltitudeRange, DisplayOptions, Palette};
use crate::region::RegionGrid;
use crate::sampling::NoiseConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("unsupported config format {0:?}, expected .ron or .json")]
    UnsupportedFormat(String),
}

/// Everything one generation run needs. Fixed for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub region_size: u32,
    pub noise: NoiseConfig,
    pub range: AltitudeRange,
    pub palette: Palette,
    pub display: DisplayOptions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            region_size: 50,
            noise: NoiseConfig::default(),
            range: AltitudeRange::default(),
            palette: Palette::default(),
            display: DisplayOptions::default(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid()?;
        self.range.validate()?;
        self.palette.validate()?;
        self.noise.validate_for_extent(self.width.max(self.height))
    }

    pub fn grid(&self) -> Result<RegionGrid, ConfigError> {
        RegionGrid::new(self.width, self.height, self.region_size)
    }

    pub fn from_ron_str(s: &str) -> Result<Self, LoadError> {
        let config: RenderConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        let config: RenderConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Format is picked from the extension: `.ron` or `.json`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "ron" => Self::from_ron_str(&fs::read_to_string(path)?),
            "json" => Self::from_json_str(&fs::read_to_string(path)?),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
