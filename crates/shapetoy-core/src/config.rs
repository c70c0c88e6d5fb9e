//! Editor configuration.

use crate::shapes::ShapeColor;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Geometry and color given to shapes created from the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDefaults {
    /// Top-left of new rectangles, center of new circles.
    pub position: Point,
    pub rect_width: f64,
    pub rect_height: f64,
    pub circle_radius: f64,
    pub fill_color: ShapeColor,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            position: Point::new(50.0, 50.0),
            rect_width: 175.0,
            rect_height: 100.0,
            circle_radius: 50.0,
            fill_color: ShapeColor::red(),
        }
    }
}

/// Editor-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Drawable canvas size in pixels.
    pub canvas_size: Size,
    pub defaults: ShapeDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(800.0, 600.0),
            defaults: ShapeDefaults::default(),
        }
    }
}

impl EditorConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject canvas sizes that cannot hold any shape.
    pub fn validate(&self) -> ConfigResult<()> {
        let Size { width, height } = self.canvas_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be positive, got {width}x{height}"
            )));
        }
        Ok(())
    }
}
