//! Font system settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::font::{DirectoryResolver, DEFAULT_CHARACTER_SET, DEFAULT_PIXEL_SIZE};
use crate::text::LayoutParameters;

/// Everything needed to set up a [`FontSystem`](crate::FontSystem)
///
/// ```toml
/// font = "OpenSans-Regular.ttf"
/// font_directory = "resources/fonts"
///
/// [layout]
/// max_line_width = 120.0
/// line_height = 5.0
/// baseline_delta = -7.0
/// justification = "left_and_right"
/// word_wrap = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSystemConfig {
    /// Font file name, resolved against `font_directory`
    pub font: String,
    /// Directory fonts are loaded from
    pub font_directory: PathBuf,
    /// Rasterization size in pixels
    pub pixel_size: f32,
    /// Characters loaded for every font
    pub character_set: String,
    /// Layout settings
    pub layout: LayoutParameters,
}

impl FontSystemConfig {
    /// Font used when none is configured
    pub const DEFAULT_FONT: &'static str = "ChanticleerRomanNF.ttf";

    /// Check every setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;

        if !(self.pixel_size.is_finite() && self.pixel_size > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "pixel_size must be positive, got {}",
                self.pixel_size
            )));
        }
        if self.character_set.is_empty() {
            return Err(ConfigError::InvalidValue(
                "character_set must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FontSystemConfig {
    fn default() -> Self {
        Self {
            font: Self::DEFAULT_FONT.to_string(),
            font_directory: PathBuf::from(DirectoryResolver::DEFAULT_ROOT),
            pixel_size: DEFAULT_PIXEL_SIZE,
            character_set: DEFAULT_CHARACTER_SET.to_string(),
            layout: LayoutParameters::default(),
        }
    }
}

impl Config for FontSystemConfig {}
