// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor state for a whole glyph set (`GlyphEditor`).
//!
//! `GlyphEditor` owns the glyph map and a single canvas bound to the active
//! character. Sub-modules split the methods by domain: the glyph lifecycle
//! and file I/O.

mod editor;
mod file_io;

use crate::canvas::GlyphCanvas;
use crate::config::EditorConfig;
use crate::editing::EditSession;
use crate::model::{Glyph, GlyphMap};
use std::sync::Arc;

/// Glyph set editor
pub struct GlyphEditor {
    /// All glyphs; the active one is stale until the next commit
    glyphs: GlyphMap,

    /// Configuration shared with every session
    config: Arc<EditorConfig>,

    /// Character currently on the canvas
    active: Option<char>,

    /// Canvas for the active character
    pub canvas: GlyphCanvas,
}

impl GlyphEditor {
    /// Create an editor over a glyph map with nothing open
    pub fn new(glyphs: GlyphMap, config: EditorConfig) -> Self {
        let config = Arc::new(config);
        let canvas = GlyphCanvas::new(EditSession::new(Vec::new(), config.clone()));
        Self {
            glyphs,
            config,
            active: None,
            canvas,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The character being edited, if any
    pub fn active_char(&self) -> Option<char> {
        self.active
    }

    /// The stored glyph map
    ///
    /// Edits to the active glyph appear here after [`GlyphEditor::commit`].
    pub fn glyphs(&self) -> &GlyphMap {
        &self.glyphs
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(ch)
    }
}

impl Default for GlyphEditor {
    fn default() -> Self {
        Self::new(GlyphMap::new(), EditorConfig::default())
    }
}
