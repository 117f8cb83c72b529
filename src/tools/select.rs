// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Select tool: pick, move and rubber-band select

use crate::editing::{Drag, EditSession, HitTarget, MouseDelegate, MouseEvent, NodeRef, Selection};
use crate::model::HandleSide;
use crate::tools::{Tool, ToolId};
use kurbo::{Point, Rect};

/// What the current press is doing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum DragState {
    #[default]
    None,
    /// Dragging out a selection rectangle (design space)
    RubberBand {
        start: Point,
        current: Point,
        extend: bool,
    },
    /// Moving every selected path
    MovePaths,
    /// Moving every selected node
    MoveNodes,
    /// Moving one handle
    MoveHandle { node: NodeRef, side: HandleSide },
}

/// The select tool
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    state: DragState,
    /// Whether the current gesture changed geometry
    moved: bool,
}

impl SelectTool {
    /// Current rubber-band rectangle, for hosts that paint it
    pub fn rubber_band(&self) -> Option<Rect> {
        match self.state {
            DragState::RubberBand { start, current, .. } => Some(Rect::from_points(start, current)),
            _ => None,
        }
    }

    fn apply_drag(&mut self, drag: Drag, session: &mut EditSession) {
        let current = session.viewport.screen_to_design(drag.current);
        let prev = session.viewport.screen_to_design(drag.prev);
        let delta = current - prev;
        match &mut self.state {
            DragState::None => {}
            DragState::RubberBand { current: end, .. } => *end = current,
            DragState::MovePaths => {
                session.translate_selected_paths(delta);
                self.moved = true;
            }
            DragState::MoveNodes => {
                session.translate_selected_nodes(delta);
                self.moved = true;
            }
            DragState::MoveHandle { node, side } => {
                session.move_handle(*node, *side, current);
                self.moved = true;
            }
        }
    }
}

impl Tool for SelectTool {
    fn id(&self) -> ToolId {
        ToolId::Select
    }
}

impl MouseDelegate for SelectTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        let pos = session.viewport.screen_to_design(event.pos);
        let extend = event.mods.shift;
        self.moved = false;

        self.state = match session.hit_test(pos) {
            Some(HitTarget::Handle { node, side }) => DragState::MoveHandle { node, side },
            Some(HitTarget::Node(node)) => {
                if !session.selection.contains_node(&node) {
                    if !extend {
                        session.selection = Selection::new();
                    }
                    session.selection.insert_node(node);
                }
                DragState::MoveNodes
            }
            Some(HitTarget::PathBody(id)) => {
                if !session.selection.contains_path(&id) {
                    if !extend {
                        session.selection = Selection::new();
                    }
                    session.selection.insert_path(id);
                }
                session.selection.clear_nodes();
                DragState::MovePaths
            }
            None => {
                if !extend {
                    session.selection.clear();
                }
                DragState::RubberBand {
                    start: pos,
                    current: pos,
                    extend,
                }
            }
        };
        tracing::debug!("Select tool: down at {:?} -> {:?}", pos, self.state);
    }

    fn left_drag_began(&mut self, _event: MouseEvent, drag: Drag, session: &mut EditSession) {
        self.apply_drag(drag, session);
    }

    fn left_drag_changed(&mut self, _event: MouseEvent, drag: Drag, session: &mut EditSession) {
        self.apply_drag(drag, session);
    }

    fn left_drag_ended(&mut self, _event: MouseEvent, drag: Drag, session: &mut EditSession) {
        self.apply_drag(drag, session);
        if let DragState::RubberBand {
            start,
            current,
            extend,
        } = self.state
        {
            session.select_in_rect(Rect::from_points(start, current), extend);
        }
    }

    fn left_up(&mut self, _event: MouseEvent, session: &mut EditSession) {
        if std::mem::take(&mut self.moved) {
            session.record_edit();
        }
        self.state = DragState::None;
    }

    fn cancel(&mut self, session: &mut EditSession) {
        if std::mem::take(&mut self.moved) {
            session.record_edit();
        }
        self.state = DragState::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::editing::{Modifiers, Mouse};
    use crate::model::{NodeKind, Path};
    use std::sync::Arc;

    fn square(min: f64, size: f64) -> Path {
        Path::polygon([
            Point::new(min, min),
            Point::new(min + size, min),
            Point::new(min + size, min + size),
            Point::new(min, min + size),
        ])
    }

    fn drag(
        tool: &mut SelectTool,
        session: &mut EditSession,
        from: Point,
        to: Point,
        mods: Modifiers,
    ) {
        let mut mouse = Mouse::new(3.0);
        mouse.mouse_down(MouseEvent::new(from).with_mods(mods), &mut *tool, session);
        let mid = from.midpoint(to);
        mouse.mouse_moved(MouseEvent::new(mid).with_mods(mods), &mut *tool, session);
        mouse.mouse_moved(MouseEvent::new(to).with_mods(mods), &mut *tool, session);
        mouse.mouse_up(MouseEvent::new(to).with_mods(mods), &mut *tool, session);
    }

    fn session(paths: Vec<Path>) -> EditSession {
        EditSession::new(paths, Arc::new(EditorConfig::default()))
    }

    #[test]
    fn dragging_a_body_moves_the_path_once_in_history() {
        let path = square(0.0, 100.0);
        let id = path.id;
        let mut session = session(vec![path]);
        let mut tool = SelectTool::default();

        drag(
            &mut tool,
            &mut session,
            Point::new(50.0, 50.0),
            Point::new(70.0, 80.0),
            Modifiers::NONE,
        );

        assert!(session.selection.contains_path(&id));
        assert_eq!(session.paths[0].nodes[0].anchor, Point::new(20.0, 30.0));
        assert!(session.undo());
        assert_eq!(session.paths[0].nodes[0].anchor, Point::new(0.0, 0.0));
        assert!(!session.can_undo());
    }

    #[test]
    fn dragging_a_node_moves_only_that_node() {
        let path = square(0.0, 100.0);
        let mut session = session(vec![path]);
        let mut tool = SelectTool::default();

        drag(
            &mut tool,
            &mut session,
            Point::new(100.0, 100.0),
            Point::new(120.0, 110.0),
            Modifiers::NONE,
        );

        assert_eq!(session.paths[0].nodes[2].anchor, Point::new(120.0, 110.0));
        assert_eq!(session.paths[0].nodes[1].anchor, Point::new(100.0, 0.0));
    }

    #[test]
    fn dragging_a_symmetric_handle_mirrors_it() {
        let mut path = square(0.0, 100.0);
        path.nodes[1].handle_out = Point::new(100.0, 30.0);
        path.nodes[1].handle_in = Point::new(100.0, -30.0);
        path.nodes[1].kind = NodeKind::Symmetric;
        let id = path.id;
        let mut session = session(vec![path]);
        session.selection.insert_path(id);
        let mut tool = SelectTool::default();

        drag(
            &mut tool,
            &mut session,
            Point::new(100.0, 30.0),
            Point::new(140.0, 30.0),
            Modifiers::NONE,
        );

        let node = session.paths[0].nodes[1];
        assert_eq!(node.handle_out, Point::new(140.0, 30.0));
        assert!((node.handle_in - Point::new(60.0, -30.0)).hypot() < 1e-9);
    }

    #[test]
    fn rubber_band_replaces_or_extends() {
        let a = square(0.0, 100.0);
        let b = square(300.0, 100.0);
        let (a_id, b_id) = (a.id, b.id);
        let mut session = session(vec![a, b]);
        let mut tool = SelectTool::default();

        drag(
            &mut tool,
            &mut session,
            Point::new(-10.0, -10.0),
            Point::new(150.0, 50.0),
            Modifiers::NONE,
        );
        assert_eq!(session.selection.node_count(), 2);
        assert!(session.selection.contains_path(&a_id));

        let shift = Modifiers {
            shift: true,
            ..Modifiers::NONE
        };
        drag(
            &mut tool,
            &mut session,
            Point::new(290.0, 290.0),
            Point::new(450.0, 350.0),
            shift,
        );
        assert_eq!(session.selection.node_count(), 4);
        assert!(session.selection.contains_path(&b_id));
        assert!(!session.can_undo());
    }

    #[test]
    fn click_on_empty_canvas_clears_selection() {
        let path = square(0.0, 100.0);
        let id = path.id;
        let mut session = session(vec![path]);
        session.selection.insert_path(id);
        let mut tool = SelectTool::default();
        let mut mouse = Mouse::new(3.0);
        mouse.mouse_down(MouseEvent::new(Point::new(500.0, 500.0)), &mut tool, &mut session);
        mouse.mouse_up(MouseEvent::new(Point::new(500.0, 500.0)), &mut tool, &mut session);
        assert!(session.selection.is_empty());
    }
}
