// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Path editing methods for EditSession: moving nodes and handles,
//! deletion, rubber-band selection and z-order.

use super::EditSession;
use crate::editing::selection::{NodeRef, Selection};
use crate::model::{EntityId, HandleSide, Node, NodeKind, Path};
use kurbo::{Point, Rect, Vec2};
use std::collections::BTreeSet;

impl EditSession {
    /// Append a path on top of the others
    pub fn add_path(&mut self, path: Path) -> EntityId {
        let id = path.id;
        self.paths_mut().push(path);
        id
    }

    /// Remove a path by id
    pub fn remove_path(&mut self, id: EntityId) -> Option<Path> {
        let index = self.path_index(id)?;
        self.selection.remove_path(&id);
        Some(self.paths_mut().remove(index))
    }

    /// Translate every node and handle of all selected paths
    pub fn translate_selected_paths(&mut self, delta: Vec2) {
        if self.selection.path_count() == 0 {
            return;
        }
        let selection = self.selection.clone();
        for path in self.paths_mut() {
            if selection.contains_path(&path.id) {
                path.translate(delta);
            }
        }
    }

    /// Translate every selected node together with its handles
    pub fn translate_selected_nodes(&mut self, delta: Vec2) {
        if !self.selection.has_nodes() {
            return;
        }
        let selection = self.selection.clone();
        for path in self.paths_mut() {
            let id = path.id;
            for index in selection.nodes_in(id) {
                if let Some(node) = path.nodes.get_mut(index) {
                    node.translate(delta);
                }
            }
        }
    }

    /// Move one handle, re-deriving the opposite handle for coupled nodes
    pub fn move_handle(&mut self, node: NodeRef, side: HandleSide, to: Point) {
        let Some(path) = self.path_mut(node.path) else {
            return;
        };
        if let Some(node) = path.nodes.get_mut(node.index) {
            set_handle(node, side, to);
        }
    }

    /// Select every node whose anchor lies inside `rect`
    ///
    /// With `extend` the hits are added to the current selection instead of
    /// replacing it.
    pub fn select_in_rect(&mut self, rect: Rect, extend: bool) {
        let mut selection = if extend {
            self.selection.clone()
        } else {
            Selection::new()
        };
        for path in self.paths.iter() {
            for (index, node) in path.nodes.iter().enumerate() {
                if rect.contains(node.anchor) {
                    selection.insert_node(NodeRef::new(path.id, index));
                }
            }
        }
        tracing::debug!(
            "Rubber band selected {} nodes in {} paths",
            selection.node_count(),
            selection.path_count()
        );
        self.selection = selection;
    }

    /// Delete selected nodes if any, else the selected whole paths
    ///
    /// Paths that lose nodes and are left with fewer than two are dropped.
    /// Returns whether anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let selection = std::mem::take(&mut self.selection);
        let before: usize = self.paths.iter().map(Path::len).sum::<usize>() + self.paths.len();

        if selection.has_nodes() {
            let paths = self.paths_mut();
            let mut trimmed = BTreeSet::new();
            for path in paths.iter_mut() {
                let doomed: BTreeSet<usize> = selection.nodes_in(path.id).collect();
                if doomed.is_empty() {
                    continue;
                }
                let mut index = 0;
                path.nodes.retain(|_| {
                    let keep = !doomed.contains(&index);
                    index += 1;
                    keep
                });
                trimmed.insert(path.id);
            }
            paths.retain(|path| !(trimmed.contains(&path.id) && path.is_degenerate()));
        } else {
            self.paths_mut()
                .retain(|path| !selection.contains_path(&path.id));
        }

        let after: usize = self.paths.iter().map(Path::len).sum::<usize>() + self.paths.len();
        after != before
    }

    /// Move a path to the top of the z-order
    pub fn bring_to_front(&mut self, id: EntityId) -> bool {
        let Some(index) = self.path_index(id) else {
            return false;
        };
        if index + 1 == self.paths.len() {
            return false;
        }
        let paths = self.paths_mut();
        let path = paths.remove(index);
        paths.push(path);
        true
    }

    /// Move a path to the bottom of the z-order
    pub fn send_to_back(&mut self, id: EntityId) -> bool {
        let Some(index) = self.path_index(id) else {
            return false;
        };
        if index == 0 {
            return false;
        }
        let paths = self.paths_mut();
        let path = paths.remove(index);
        paths.insert(0, path);
        true
    }

    /// Bring every selected path to the front, keeping their relative order
    pub fn bring_selection_to_front(&mut self) -> bool {
        let ids: Vec<EntityId> = self.selected_paths().map(|path| path.id).collect();
        ids.into_iter()
            .fold(false, |moved, id| self.bring_to_front(id) | moved)
    }

    /// Send every selected path to the back, keeping their relative order
    pub fn send_selection_to_back(&mut self) -> bool {
        let ids: Vec<EntityId> = self.selected_paths().map(|path| path.id).collect();
        ids.into_iter()
            .rev()
            .fold(false, |moved, id| self.send_to_back(id) | moved)
    }
}

/// Place a handle and keep the node's coupling invariant
pub fn set_handle(node: &mut Node, side: HandleSide, to: Point) {
    *node.handle_mut(side) = to;
    let anchor = node.anchor;
    let opposite = node.handle(side.opposite());
    let derived = match node.kind {
        NodeKind::Cusp => return,
        NodeKind::Symmetric => anchor - (to - anchor),
        NodeKind::Smooth => constrained_opposite(anchor, to, opposite),
    };
    *node.handle_mut(side.opposite()) = derived;
}

/// Compute the constrained position of the opposite handle
///
/// Rotates `opposite` to point directly away from `moved_handle` while
/// keeping its distance from the anchor.
fn constrained_opposite(anchor: Point, moved_handle: Point, opposite: Point) -> Point {
    let moved = moved_handle - anchor;
    if moved.hypot() <= crate::model::node::GEOMETRY_EPSILON {
        return opposite;
    }
    let angle = moved.y.atan2(moved.x);
    let distance = (opposite - anchor).hypot();
    let opposite_angle = angle + std::f64::consts::PI;
    Point::new(
        anchor.x + distance * opposite_angle.cos(),
        anchor.y + distance * opposite_angle.sin(),
    )
}
