// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! File I/O operations for GlyphEditor (load, save, import, compile)

use super::GlyphEditor;
use crate::compiler::{CompileError, FontCompiler};
use crate::config::EditorConfig;
use crate::import::{FontOutlineSource, ImportError, paths_from_path_data};
use crate::model::GlyphMap;
use anyhow::Result;
use std::path::Path;

impl GlyphEditor {
    /// Open a glyph map file
    pub fn load(path: &Path, config: EditorConfig) -> Result<Self> {
        let glyphs = GlyphMap::load(path)?;
        Ok(Self::new(glyphs, config))
    }

    /// Commit the active glyph and write the whole map
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.commit();
        self.glyphs.save(path)
    }

    /// Import characters from a font file's bytes
    ///
    /// Imported glyphs replace existing ones. Returns the characters the
    /// font had no outline for. If the active glyph was replaced, the
    /// canvas is reloaded.
    pub fn import_font(&mut self, data: &[u8], chars: &str) -> Result<Vec<char>, ImportError> {
        let source = FontOutlineSource::from_bytes(data)?;
        self.commit();
        let report = source.import_glyphs(chars.chars(), &self.config.canvas);
        let reload = self
            .active
            .filter(|ch| report.glyphs.get(*ch).is_some());
        for (ch, glyph) in report.glyphs.iter() {
            self.glyphs.insert(ch, glyph.clone());
        }
        if let Some(ch) = reload {
            self.active = None;
            self.open(ch);
        }
        Ok(report.missing)
    }

    /// Replace a glyph's outline with a path-description string
    pub fn import_path_data(&mut self, ch: char, data: &str) -> Result<(), ImportError> {
        let paths = paths_from_path_data(data)?;
        self.commit();
        let canvas_size = self.config.canvas.size();
        self.glyphs.entry(ch).set_paths(paths, canvas_size);
        if self.active == Some(ch) {
            self.active = None;
            self.open(ch);
        }
        Ok(())
    }

    /// Commit the active glyph and compile the map into font bytes
    pub fn compile(&mut self, font_name: &str) -> Result<Vec<u8>, CompileError> {
        self.commit();
        FontCompiler::new(&self.config).compile(&self.glyphs, font_name)
    }
}
