// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyph outlines read from a font file with `ttf-parser`

use super::{ImportError, OutlineCommand, paths_from_font_outline};
use crate::config::CanvasConfig;
use crate::model::{Glyph, GlyphMap};
use kurbo::Point;
use ttf_parser::{Face, OutlineBuilder};

/// Collects outline callbacks as commands, in font units
#[derive(Debug, Default)]
struct CommandCollector {
    commands: Vec<OutlineCommand>,
}

impl CommandCollector {
    fn point(x: f32, y: f32) -> Point {
        Point::new(f64::from(x), f64::from(y))
    }
}

impl OutlineBuilder for CommandCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(OutlineCommand::MoveTo(Self::point(x, y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(OutlineCommand::LineTo(Self::point(x, y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.commands
            .push(OutlineCommand::QuadTo(Self::point(x1, y1), Self::point(x, y)));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands.push(OutlineCommand::CurveTo(
            Self::point(x1, y1),
            Self::point(x2, y2),
            Self::point(x, y),
        ));
    }

    fn close(&mut self) {
        self.commands.push(OutlineCommand::Close);
    }
}

/// Result of importing a set of characters
#[derive(Debug, Default)]
pub struct ImportReport {
    pub glyphs: GlyphMap,
    /// Characters the font has no outline for
    pub missing: Vec<char>,
}

/// A parsed font that outlines can be pulled from
pub struct FontOutlineSource<'a> {
    face: Face<'a>,
}

impl<'a> FontOutlineSource<'a> {
    /// Parse the first face of a font file
    pub fn from_bytes(data: &'a [u8]) -> Result<Self, ImportError> {
        let face = Face::parse(data, 0)?;
        if face.units_per_em() == 0 {
            return Err(ImportError::InvalidUnitsPerEm);
        }
        Ok(Self { face })
    }

    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    /// Outline commands for a character, in font units
    ///
    /// `None` when the font does not map the character or the glyph has no
    /// outline.
    pub fn outline(&self, ch: char) -> Option<Vec<OutlineCommand>> {
        let glyph_id = self.face.glyph_index(ch)?;
        let mut collector = CommandCollector::default();
        self.face.outline_glyph(glyph_id, &mut collector)?;
        Some(collector.commands)
    }

    /// Import each character as an editor glyph placed on the canvas
    pub fn import_glyphs(
        &self,
        chars: impl IntoIterator<Item = char>,
        canvas: &CanvasConfig,
    ) -> ImportReport {
        let mut report = ImportReport::default();
        for ch in chars {
            let paths = self
                .outline(ch)
                .map(|commands| paths_from_font_outline(&commands, self.units_per_em(), canvas))
                .unwrap_or_default();
            if paths.is_empty() {
                tracing::warn!("Import: no outline for {:?}", ch);
                report.missing.push(ch);
                continue;
            }
            let mut glyph = Glyph::default();
            glyph.set_paths(paths, canvas.size());
            report.glyphs.insert(ch, glyph);
        }
        tracing::info!(
            "Imported {} glyphs, {} missing",
            report.glyphs.len(),
            report.missing.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_not_a_font() {
        assert!(matches!(
            FontOutlineSource::from_bytes(b"definitely not a font"),
            Err(ImportError::Font(_))
        ));
    }

    #[test]
    fn collector_records_commands_in_order() {
        let mut collector = CommandCollector::default();
        collector.move_to(0.0, 0.0);
        collector.quad_to(5.0, 10.0, 10.0, 0.0);
        collector.close();
        assert_eq!(
            collector.commands,
            vec![
                OutlineCommand::MoveTo(Point::new(0.0, 0.0)),
                OutlineCommand::QuadTo(Point::new(5.0, 10.0), Point::new(10.0, 0.0)),
                OutlineCommand::Close,
            ]
        );
    }
}
