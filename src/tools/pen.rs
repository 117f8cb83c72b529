// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Pen tool for drawing bezier paths
//!
//! Each click appends a corner node to the path in progress. Dragging before
//! the release pulls out the node's outgoing handle and mirrors the incoming
//! one, making the node smooth. Clicking the first node closes the path.

use crate::editing::{Drag, EditSession, MouseDelegate, MouseEvent, Selection};
use crate::model::{EntityId, Node, NodeKind, Path};
use crate::tools::{Tool, ToolId};

/// The pen tool
#[derive(Debug, Clone, Default)]
pub struct PenTool {
    /// Path currently being drawn
    path: Option<EntityId>,
    /// Node placed (or grabbed) by the current press
    active_node: Option<usize>,
    /// Whether the current press changed geometry
    changed: bool,
}

impl PenTool {
    /// The path in progress, if it still exists in the session
    pub fn current_path(&self, session: &EditSession) -> Option<EntityId> {
        self.path.filter(|id| session.path(*id).is_some())
    }

    /// Remove the most recent node of the path in progress
    ///
    /// A path with a single node is removed entirely. History is not
    /// touched.
    pub fn undo_last_point(&mut self, session: &mut EditSession) -> bool {
        let Some(id) = self.current_path(session) else {
            return false;
        };
        self.active_node = None;
        let remaining = match session.path_mut(id) {
            Some(path) => {
                path.nodes.pop();
                path.nodes.len()
            }
            None => return false,
        };
        if remaining == 0 {
            session.remove_path(id);
            self.path = None;
        }
        tracing::debug!("Pen tool: removed last point, {} remain", remaining);
        true
    }

    /// End the pen session, dropping a path too short to keep
    fn finish(&mut self, session: &mut EditSession) {
        self.active_node = None;
        let Some(id) = self.path.take() else {
            return;
        };
        if session.path(id).is_some_and(Path::is_degenerate) {
            session.remove_path(id);
            session.record_edit();
            tracing::debug!("Pen tool: dropped single-node path");
        }
    }
}

impl Tool for PenTool {
    fn id(&self) -> ToolId {
        ToolId::Pen
    }

    fn deactivate(&mut self, session: &mut EditSession) {
        self.finish(session);
    }
}

impl MouseDelegate for PenTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        let pos = session.viewport.screen_to_design(event.pos);
        self.changed = false;

        let Some(id) = self.current_path(session) else {
            let path = Path::open_at(pos);
            let id = session.add_path(path);
            session.selection = Selection::single_path(id);
            self.path = Some(id);
            self.active_node = Some(0);
            self.changed = true;
            tracing::debug!("Pen tool: started path {} at {:?}", id, pos);
            return;
        };

        let hit = session.hit_test_path_nodes(id, pos);
        let Some(path) = session.path_mut(id) else {
            return;
        };
        let len = path.nodes.len();
        let last = len - 1;

        match hit {
            Some(0) if len >= 2 => {
                path.closed = true;
                self.path = None;
                self.active_node = None;
                self.changed = true;
                tracing::debug!("Pen tool: closed path {} with {} nodes", id, len);
            }
            Some(index) if index == last && event.count >= 2 => {
                let node = &mut path.nodes[last];
                node.handle_out = node.anchor;
                node.kind = NodeKind::Cusp;
                self.active_node = None;
                self.changed = true;
                tracing::debug!("Pen tool: flattened handle of node {}", last);
            }
            Some(index) if index == last => {
                // Grab the last node again to re-pull its handle.
                self.active_node = Some(last);
            }
            _ => {
                path.nodes.push(Node::corner(pos));
                self.active_node = Some(len);
                self.changed = true;
            }
        }
    }

    fn left_drag_began(&mut self, event: MouseEvent, drag: Drag, session: &mut EditSession) {
        self.left_drag_changed(event, drag, session);
    }

    fn left_drag_changed(&mut self, _event: MouseEvent, drag: Drag, session: &mut EditSession) {
        let (Some(id), Some(index)) = (self.path, self.active_node) else {
            return;
        };
        let handle = session.viewport.screen_to_design(drag.current);
        let Some(node) = session
            .path_mut(id)
            .and_then(|path| path.nodes.get_mut(index))
        else {
            return;
        };
        node.handle_out = handle;
        node.handle_in = node.anchor - (handle - node.anchor);
        node.kind = NodeKind::Smooth;
        self.changed = true;
    }

    fn left_up(&mut self, _event: MouseEvent, session: &mut EditSession) {
        if std::mem::take(&mut self.changed) {
            session.record_edit();
        }
    }

    fn cancel(&mut self, session: &mut EditSession) {
        if std::mem::take(&mut self.changed) {
            session.record_edit();
        }
        self.finish(session);
    }
}
