// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyphs and the character-keyed glyph map.
//!
//! The glyph map is the persistence boundary of the editor: the shell reads
//! and writes it wholesale as JSON, one entry per single-character key with
//! `paths`, `advanceWidth` and `previewThumbnail` fields.

use super::path::Path;
use anyhow::{Context, Result};
use kurbo::{BezPath, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single drawn character
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    #[serde(default)]
    pub paths: Vec<Path>,
    /// Explicit advance width; `None` means computed at compile time
    #[serde(default)]
    pub advance_width: Option<f64>,
    /// SVG rendering of the outline, regenerated on every commit
    #[serde(default)]
    pub preview_thumbnail: Option<String>,
}

impl Glyph {
    pub fn new(paths: Vec<Path>) -> Self {
        Self {
            paths,
            advance_width: None,
            preview_thumbnail: None,
        }
    }

    /// Whether this glyph has any outline worth compiling
    pub fn has_outline(&self) -> bool {
        self.paths.iter().any(|path| !path.is_degenerate())
    }

    /// All paths of this glyph as one `BezPath` in editor space
    pub fn to_bezpath(&self) -> BezPath {
        let mut bez = BezPath::new();
        for path in self.paths.iter().filter(|p| !p.is_degenerate()) {
            bez.extend(path.to_bezpath().elements().iter().copied());
        }
        bez
    }

    /// Render the preview thumbnail for a canvas of the given size
    ///
    /// The SVG uses the canvas as its view box so thumbnails of different
    /// glyphs line up when shown side by side.
    pub fn render_thumbnail(&self, canvas: Size) -> String {
        format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\">",
                "<path fill-rule=\"evenodd\" d=\"{}\"/></svg>"
            ),
            canvas.width,
            canvas.height,
            self.to_bezpath().to_svg()
        )
    }

    /// Replace the outline and refresh the thumbnail
    pub fn set_paths(&mut self, paths: Vec<Path>, canvas: Size) {
        self.paths = paths;
        self.preview_thumbnail = Some(self.render_thumbnail(canvas));
    }
}

/// Character to glyph map, ordered by codepoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<String, Glyph>",
    try_from = "BTreeMap<String, Glyph>"
)]
pub struct GlyphMap {
    glyphs: BTreeMap<char, Glyph>,
}

impl GlyphMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn get_mut(&mut self, ch: char) -> Option<&mut Glyph> {
        self.glyphs.get_mut(&ch)
    }

    /// Get the glyph for a character, creating an empty one if needed
    pub fn entry(&mut self, ch: char) -> &mut Glyph {
        self.glyphs.entry(ch).or_default()
    }

    pub fn insert(&mut self, ch: char, glyph: Glyph) -> Option<Glyph> {
        self.glyphs.insert(ch, glyph)
    }

    pub fn remove(&mut self, ch: char) -> Option<Glyph> {
        self.glyphs.remove(&ch)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Glyph)> {
        self.glyphs.iter().map(|(ch, glyph)| (*ch, glyph))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a glyph map from a JSON file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read glyph map {}", path.display()))?;
        let map = Self::from_json(&json)
            .with_context(|| format!("Failed to parse glyph map {}", path.display()))?;
        tracing::info!("Loaded {} glyphs from {}", map.len(), path.display());
        Ok(map)
    }

    /// Write the glyph map to a JSON file, replacing it wholesale
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let json = self.to_json().context("Failed to serialize glyph map")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write glyph map {}", path.display()))?;
        tracing::info!("Saved {} glyphs to {}", self.len(), path.display());
        Ok(())
    }
}

impl FromIterator<(char, Glyph)> for GlyphMap {
    fn from_iter<I: IntoIterator<Item = (char, Glyph)>>(iter: I) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
        }
    }
}

impl From<GlyphMap> for BTreeMap<String, Glyph> {
    fn from(map: GlyphMap) -> Self {
        map.glyphs
            .into_iter()
            .map(|(ch, glyph)| (ch.to_string(), glyph))
            .collect()
    }
}

impl TryFrom<BTreeMap<String, Glyph>> for GlyphMap {
    type Error = String;

    fn try_from(raw: BTreeMap<String, Glyph>) -> std::result::Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(key, glyph)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok((ch, glyph)),
                    _ => Err(format!("glyph key {key:?} is not a single character")),
                }
            })
            .collect()
    }
}
