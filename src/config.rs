use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::color::{Color, PALETTE};
use crate::command::DEFAULT_CAPACITY;
use crate::tool::{ToolKind, ToolSettings};

/// Errors that can occur while loading a canvas configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Startup configuration of the canvas and its tools.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "width": 640, "height": 480, "settings": { "color": "#000" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Hex color the canvas starts with and is cleared to
    pub background: String,
    pub history_capacity: usize,
    /// Hex swatches shown in the palette
    pub palette: Vec<String>,
    /// Tool selected at startup
    pub tool: ToolKind,
    pub settings: ToolSettings,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            background: "#ffffff".to_owned(),
            history_capacity: DEFAULT_CAPACITY,
            palette: PALETTE.iter().map(|hex| (*hex).to_owned()).collect(),
            tool: ToolKind::default(),
            settings: ToolSettings::default(),
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded canvas config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("history_capacity must be at least 1".to_owned()));
        }
        self.background_color()?;
        self.palette_colors()?;
        self.settings
            .validate()
            .map_err(|err| ConfigError::Invalid(format!("tool settings: {err}")))?;
        Ok(())
    }

    pub fn background_color(&self) -> ConfigResult<Color> {
        Color::from_hex(&self.background)
            .map_err(|err| ConfigError::Invalid(format!("background: {err}")))
    }

    pub fn palette_colors(&self) -> ConfigResult<Vec<Color>> {
        self.palette
            .iter()
            .map(|hex| {
                Color::from_hex(hex).map_err(|err| ConfigError::Invalid(format!("palette: {err}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::FillMode;

    #[test]
    fn defaults_are_valid() {
        let config = CanvasConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (1200, 700));
        assert_eq!(config.history_capacity, 30);
        assert_eq!(config.palette.len(), 20);
        assert_eq!(config.background_color().unwrap(), Color::WHITE);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CanvasConfig::from_json_str(
            r##"{ "width": 64, "settings": { "color": "#000", "fill_mode": "Filled" } }"##,
        )
        .unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 700);
        assert_eq!(config.settings.color, Color::BLACK);
        assert_eq!(config.settings.size, 6);
        assert_eq!(config.settings.fill_mode, FillMode::Filled);
    }

    #[test]
    fn rejects_bad_values() {
        for json in [
            r#"{ "width": 0 }"#,
            r#"{ "history_capacity": 0 }"#,
            r#"{ "background": "white" }"#,
            r##"{ "palette": ["#000", "#12345"] }"##,
            r#"{ "settings": { "size": 0 } }"#,
            r#"{ "settings": { "opacity": 1.5 } }"#,
        ] {
            assert!(
                matches!(CanvasConfig::from_json_str(json), Err(ConfigError::Invalid(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(CanvasConfig::from_json_str("{ width: "), Err(ConfigError::Json(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            CanvasConfig::load("/nonexistent/raster_paint.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
