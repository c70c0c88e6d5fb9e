//! Application configuration.

use serde::{Deserialize, Serialize};
use shapetoy_core::config::{ConfigError, EditorConfig};
use shapetoy_render::{RenderStyle, RendererError};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Id of the `<canvas>` element to draw on.
    pub canvas_id: String,
    /// Minimum log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
    pub editor: EditorConfig,
    pub style: RenderStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            log_level: "info".to_string(),
            editor: EditorConfig::default(),
            style: RenderStyle::default(),
        }
    }
}

impl AppConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.editor.validate()?;
        config.level()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    pub fn level(&self) -> Result<log::Level, ConfigError> {
        log::Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::Invalid(format!("unknown log level {:?}", self.log_level)))
    }
}
