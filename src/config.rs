// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration loaded from `glyphforge.toml`.
//!
//! Every field is optional in the file; missing values fall back to the
//! defaults in [`crate::settings`].

use crate::settings;
use anyhow::{Context, Result};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "glyphforge.toml";

/// Top-level editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas: CanvasConfig,
    pub tools: ToolConfig,
    pub font: FontConfig,
    /// Points evaluated per curved segment when flattening paths
    pub samples_per_segment: usize,
    /// Maximum number of undo snapshots per glyph
    pub history_depth: usize,
}

/// Editor canvas geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    /// Distance of the baseline from the top edge
    pub baseline: f64,
}

/// Tool tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub brush_width: f64,
    pub brush_min_spacing: f64,
    pub brush_tension: f64,
    pub square_size: f64,
    pub circle_radius: f64,
    /// Hit radius in screen pixels
    pub hit_radius: f64,
    /// Drag threshold in screen pixels
    pub drag_threshold: f64,
}

/// Compiled font metrics and spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    /// Extra advance added to every auto-spaced glyph
    pub letter_spacing: f64,
    pub min_advance_width: f64,
    pub advance_margin: f64,
    pub quadratic_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            tools: ToolConfig::default(),
            font: FontConfig::default(),
            samples_per_segment: settings::sampling::SAMPLES_PER_SEGMENT,
            history_depth: settings::interaction::HISTORY_DEPTH,
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: settings::canvas::WIDTH,
            height: settings::canvas::HEIGHT,
            baseline: settings::canvas::BASELINE,
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            brush_width: settings::brush::WIDTH,
            brush_min_spacing: settings::brush::MIN_SPACING,
            brush_tension: settings::brush::TENSION,
            square_size: settings::shapes::SQUARE_SIZE,
            circle_radius: settings::shapes::CIRCLE_RADIUS,
            hit_radius: settings::interaction::HIT_RADIUS,
            drag_threshold: settings::interaction::DRAG_THRESHOLD,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            units_per_em: settings::metrics::UNITS_PER_EM,
            ascender: settings::metrics::ASCENDER,
            descender: settings::metrics::DESCENDER,
            letter_spacing: 0.0,
            min_advance_width: settings::metrics::MIN_ADVANCE_WIDTH,
            advance_margin: settings::metrics::ADVANCE_MARGIN,
            quadratic_tolerance: settings::metrics::QUADRATIC_TOLERANCE,
        }
    }
}

impl CanvasConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl EditorConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid configuration")
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load a configuration file if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.samples_per_segment, 30);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EditorConfig::from_toml_str(
            r#"
            history_depth = 12

            [tools]
            brush_width = 40.0

            [font]
            letter_spacing = 25.0
            "#,
        )
        .unwrap();

        assert_eq!(config.history_depth, 12);
        assert_eq!(config.tools.brush_width, 40.0);
        assert_eq!(config.tools.square_size, settings::shapes::SQUARE_SIZE);
        assert_eq!(config.font.letter_spacing, 25.0);
        assert_eq!(config.font.units_per_em, 1000);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(EditorConfig::from_toml_str("history_depth = \"lots\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("glyphforge-does-not-exist.toml");
        let config = EditorConfig::load_or_default(&path).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn canvas_center() {
        let canvas = CanvasConfig::default();
        assert_eq!(canvas.center(), Point::new(500.0, 500.0));
    }
}
