// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Host-agnostic glyph canvas.
//!
//! `GlyphCanvas` owns the edit session, the pointer state machine and the
//! active tool. A GUI host forwards its pointer and keyboard events here and
//! paints from `session.paths` through `session.viewport`.

mod keyboard;
mod pointer;

pub use keyboard::shortcut_for;

use crate::editing::{EditSession, Mouse};
use crate::tools::{ToolBox, ToolId};
use kurbo::Point;

/// Editor commands reachable from the keyboard or a toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
    /// Delete selected nodes, or selected paths when no node is selected
    Delete,
    /// Remove the most recent pen node
    UndoLastPoint,
    BringToFront,
    SendToBack,
    Union,
    Hole,
    SetTool(ToolId),
}

/// The glyph editor canvas
pub struct GlyphCanvas {
    /// The editing session
    pub session: EditSession,

    /// Current editing tool
    tool: ToolBox,

    /// Mouse state machine
    mouse: Mouse,

    /// Last screen position while panning
    pan_anchor: Option<Point>,
}

impl GlyphCanvas {
    /// Create a canvas over a session, starting with the select tool
    pub fn new(session: EditSession) -> Self {
        let mouse = Mouse::new(session.config.tools.drag_threshold);
        Self {
            session,
            tool: ToolBox::default(),
            mouse,
            pan_anchor: None,
        }
    }

    pub fn tool_id(&self) -> ToolId {
        self.tool.id()
    }

    /// The active tool, for hosts that paint tool overlays
    pub fn tool(&self) -> &ToolBox {
        &self.tool
    }

    /// Whether a pointer gesture or pan is in progress
    pub fn is_busy(&self) -> bool {
        self.mouse.is_down() || self.pan_anchor.is_some()
    }

    /// Switch tools, finishing whatever the current tool was doing
    ///
    /// A tool may hand control on as soon as it is activated; the shape
    /// tool does this after inserting its preset.
    pub fn set_tool(&mut self, id: ToolId) {
        self.finish_gesture();
        self.tool.deactivate(&mut self.session);
        let mut next = Some(id);
        while let Some(id) = next.take() {
            self.tool = ToolBox::for_id(id);
            next = self.tool.activate(&mut self.session);
        }
        tracing::debug!("Active tool: {:?}", self.tool.id());
    }

    /// Run an editor command; returns whether anything changed
    pub fn execute(&mut self, command: Command) -> bool {
        tracing::debug!("Command: {:?}", command);
        if command != Command::UndoLastPoint {
            self.finish_gesture();
        }
        let session = &mut self.session;
        match command {
            Command::Undo => session.undo(),
            Command::Redo => session.redo(),
            Command::Delete => record_if(session, EditSession::delete_selection),
            Command::UndoLastPoint => self.tool.undo_last_point(session),
            Command::BringToFront => record_if(session, EditSession::bring_selection_to_front),
            Command::SendToBack => record_if(session, EditSession::send_selection_to_back),
            Command::Union => session.union_selected(),
            Command::Hole => session.hole_selected(),
            Command::SetTool(id) => {
                self.set_tool(id);
                true
            }
        }
    }

    /// Finish the current gesture and whatever the tool holds open, keeping
    /// the same tool active
    pub fn settle(&mut self) {
        self.finish_gesture();
        self.tool.deactivate(&mut self.session);
        self.tool = ToolBox::for_id(self.tool.id());
    }

    /// Replace the canvas content, as when switching glyphs
    pub fn load_paths(&mut self, paths: Vec<crate::model::Path>) {
        self.mouse.cancel(&mut self.tool, &mut self.session);
        self.pan_anchor = None;
        self.tool = ToolBox::for_id(ToolId::Select);
        self.session.load_paths(paths);
    }

    /// Finish any held gesture so its result lands in history
    fn finish_gesture(&mut self) {
        self.pan_anchor = None;
        self.mouse.release(&mut self.tool, &mut self.session);
    }
}

fn record_if(session: &mut EditSession, edit: impl FnOnce(&mut EditSession) -> bool) -> bool {
    let changed = edit(session);
    if changed {
        session.record_edit();
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::editing::{Modifiers, MouseButton, MouseEvent};
    use crate::model::Path;
    use crate::tools::ShapeKind;
    use std::sync::Arc;

    fn canvas_with(paths: Vec<Path>) -> GlyphCanvas {
        GlyphCanvas::new(EditSession::new(paths, Arc::new(EditorConfig::default())))
    }

    fn square(min: f64, size: f64) -> Path {
        Path::polygon([
            Point::new(min, min),
            Point::new(min + size, min),
            Point::new(min + size, min + size),
            Point::new(min, min + size),
        ])
    }

    fn at(x: f64, y: f64) -> MouseEvent {
        MouseEvent::new(Point::new(x, y))
    }

    #[test]
    fn shape_tool_inserts_and_returns_to_select() {
        let mut canvas = canvas_with(Vec::new());
        assert!(canvas.execute(Command::SetTool(ToolId::Shapes(ShapeKind::Square))));
        assert_eq!(canvas.tool_id(), ToolId::Select);
        assert_eq!(canvas.session.paths.len(), 1);
        assert_eq!(canvas.session.selection.path_count(), 1);
    }

    #[test]
    fn alt_drag_pans_instead_of_editing() {
        let mut canvas = canvas_with(vec![square(0.0, 100.0)]);
        let alt = Modifiers {
            alt: true,
            ..Modifiers::NONE
        };
        canvas.pointer_down(at(50.0, 50.0).with_mods(alt));
        canvas.pointer_move(at(80.0, 70.0).with_mods(alt));
        canvas.pointer_up(at(80.0, 70.0).with_mods(alt));

        assert_eq!(canvas.session.viewport.offset, kurbo::Vec2::new(30.0, 20.0));
        assert_eq!(canvas.session.paths[0].nodes[0].anchor, Point::new(0.0, 0.0));
        assert!(!canvas.session.can_undo());
    }

    #[test]
    fn middle_button_pans_with_any_tool() {
        let mut canvas = canvas_with(Vec::new());
        canvas.set_tool(ToolId::Pen);
        canvas.pointer_down(at(10.0, 10.0).with_button(MouseButton::Middle));
        canvas.pointer_move(at(15.0, 10.0).with_button(MouseButton::Middle));
        canvas.pointer_up(at(15.0, 10.0).with_button(MouseButton::Middle));
        assert_eq!(canvas.session.viewport.offset, kurbo::Vec2::new(5.0, 0.0));
        assert!(canvas.session.paths.is_empty());
    }

    #[test]
    fn pointer_leave_commits_the_drag() {
        let mut canvas = canvas_with(vec![square(0.0, 100.0)]);
        canvas.pointer_down(at(50.0, 50.0));
        canvas.pointer_move(at(60.0, 50.0));
        canvas.pointer_leave();

        assert!(!canvas.is_busy());
        assert_eq!(canvas.session.paths[0].nodes[0].anchor, Point::new(10.0, 0.0));
        assert!(canvas.session.can_undo());
    }

    #[test]
    fn delete_and_undo_through_commands() {
        let path = square(0.0, 100.0);
        let id = path.id;
        let mut canvas = canvas_with(vec![path]);
        canvas.session.selection.insert_path(id);

        assert!(canvas.execute(Command::Delete));
        assert!(canvas.session.paths.is_empty());
        assert!(canvas.execute(Command::Undo));
        assert_eq!(canvas.session.paths.len(), 1);
        assert!(canvas.execute(Command::Redo));
        assert!(canvas.session.paths.is_empty());
        assert!(!canvas.execute(Command::Delete));
    }

    #[test]
    fn n_undos_then_n_redos_restore_geometry() {
        let mut canvas = canvas_with(Vec::new());
        canvas.set_tool(ToolId::Pen);
        for (x, y) in [(100.0, 100.0), (300.0, 100.0), (300.0, 300.0), (100.0, 100.0)] {
            canvas.pointer_down(at(x, y));
            canvas.pointer_up(at(x, y));
        }
        canvas.set_tool(ToolId::Select);
        canvas.pointer_down(at(250.0, 150.0));
        canvas.pointer_move(at(270.0, 150.0));
        canvas.pointer_up(at(270.0, 150.0));
        let committed = canvas.session.paths.clone();

        let mut undone = 0;
        while canvas.execute(Command::Undo) {
            undone += 1;
        }
        assert_eq!(undone, 5);
        assert!(canvas.session.paths.is_empty());
        for _ in 0..undone {
            assert!(canvas.execute(Command::Redo));
        }
        assert_eq!(*canvas.session.paths, *committed);
    }

    #[test]
    fn escape_removes_the_last_pen_point() {
        let mut canvas = canvas_with(Vec::new());
        canvas.set_tool(ToolId::Pen);
        canvas.pointer_down(at(0.0, 0.0));
        canvas.pointer_up(at(0.0, 0.0));
        canvas.pointer_down(at(100.0, 0.0));
        canvas.pointer_up(at(100.0, 0.0));

        assert!(canvas.key_down("Escape", Modifiers::NONE));
        assert_eq!(canvas.session.paths[0].len(), 1);
    }

    #[test]
    fn switching_away_from_pen_drops_a_lone_node() {
        let mut canvas = canvas_with(Vec::new());
        canvas.set_tool(ToolId::Pen);
        canvas.pointer_down(at(0.0, 0.0));
        canvas.pointer_up(at(0.0, 0.0));
        canvas.set_tool(ToolId::Brush);
        assert!(canvas.session.paths.is_empty());
    }
}
