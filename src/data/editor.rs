// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyph lifecycle for GlyphEditor

use super::GlyphEditor;

impl GlyphEditor {
    /// Open a character on the canvas
    ///
    /// The current glyph is committed first. History and selection start
    /// fresh for the new glyph.
    pub fn open(&mut self, ch: char) {
        self.commit();
        let paths = self
            .glyphs
            .get(ch)
            .map(|glyph| glyph.paths.clone())
            .unwrap_or_default();
        tracing::debug!("Opening {:?} with {} paths", ch, paths.len());
        self.canvas.load_paths(paths);
        self.active = Some(ch);
    }

    /// Commit the canvas into the active glyph and refresh its thumbnail
    ///
    /// Any gesture in progress is finished first. Degenerate paths left by
    /// an unfinished pen stroke are not stored.
    pub fn commit(&mut self) {
        let Some(ch) = self.active else {
            return;
        };
        self.canvas.settle();
        let paths: Vec<_> = self
            .canvas
            .session
            .paths
            .iter()
            .filter(|path| !path.is_degenerate())
            .cloned()
            .collect();
        let canvas_size = self.config.canvas.size();
        self.glyphs.entry(ch).set_paths(paths, canvas_size);
        tracing::debug!("Committed {:?}", ch);
    }

    /// Commit and leave the canvas empty
    pub fn close(&mut self) {
        self.commit();
        self.active = None;
        self.canvas.load_paths(Vec::new());
    }

    /// Set or clear the explicit advance width of the active glyph
    pub fn set_advance_width(&mut self, width: Option<f64>) {
        if let Some(ch) = self.active {
            self.glyphs.entry(ch).advance_width = width;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::canvas::Command;
    use crate::data::GlyphEditor;
    use crate::editing::MouseEvent;
    use crate::model::{Glyph, GlyphMap, Path};
    use crate::tools::{ShapeKind, ToolId};
    use kurbo::Point;

    fn square() -> Path {
        Path::polygon([
            Point::new(100.0, 100.0),
            Point::new(300.0, 100.0),
            Point::new(300.0, 300.0),
            Point::new(100.0, 300.0),
        ])
    }

    #[test]
    fn switching_commits_and_resets_history() {
        let mut editor = GlyphEditor::default();
        editor.open('a');
        editor
            .canvas
            .execute(Command::SetTool(ToolId::Shapes(ShapeKind::Square)));
        assert!(editor.canvas.session.can_undo());

        editor.open('b');
        assert_eq!(editor.active_char(), Some('b'));
        assert!(editor.canvas.session.paths.is_empty());
        assert!(!editor.canvas.session.can_undo());
        assert!(editor.canvas.session.selection.is_empty());

        let a = editor.glyph('a').unwrap();
        assert_eq!(a.paths.len(), 1);
        assert!(a.preview_thumbnail.as_deref().unwrap().starts_with("<svg"));
    }

    #[test]
    fn reopening_restores_paths() {
        let glyphs: GlyphMap = [('x', Glyph::new(vec![square()]))].into_iter().collect();
        let mut editor = GlyphEditor::new(glyphs, Default::default());
        editor.open('x');
        assert_eq!(editor.canvas.session.paths.len(), 1);

        editor.canvas.execute(Command::SetTool(ToolId::Pen));
        let click = MouseEvent::new(Point::new(500.0, 500.0));
        editor.canvas.pointer_down(click);
        editor.canvas.pointer_up(click);
        editor.open('y');
        editor.open('x');

        // The lone pen node was dropped on commit.
        assert_eq!(editor.canvas.session.paths.len(), 1);
        assert_eq!(editor.canvas.tool_id(), ToolId::Select);
    }

    #[test]
    fn advance_width_applies_to_the_active_glyph() {
        let mut editor = GlyphEditor::default();
        editor.set_advance_width(Some(500.0));
        assert!(editor.glyphs().is_empty());

        editor.open('m');
        editor.set_advance_width(Some(500.0));
        editor.close();
        assert_eq!(editor.glyph('m').unwrap().advance_width, Some(500.0));
        assert_eq!(editor.active_char(), None);
    }
}
