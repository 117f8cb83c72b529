// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session - manages editing state for a single glyph

mod boolean_ops;
mod hit_testing;
mod path_editing;

pub use hit_testing::HitTarget;

use super::selection::Selection;
use super::undo::UndoState;
use super::viewport::ViewPort;
use crate::boolean::BooleanEngine;
use crate::config::EditorConfig;
use crate::model::{EntityId, Path};
use std::sync::Arc;

/// Editing session for one glyph
///
/// Holds the working path list (z-ordered, last on top), the transient
/// selection, the viewport and the snapshot history. Paths sit behind an
/// `Arc` so snapshots share storage until the next mutation copies them.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// The editable paths, bottom to top
    pub paths: Arc<Vec<Path>>,

    /// Currently selected paths and nodes
    pub selection: Selection,

    /// Viewport transformation
    pub viewport: ViewPort,

    /// Editor configuration shared with the host
    pub config: Arc<EditorConfig>,

    undo: UndoState<Arc<Vec<Path>>>,
}

impl EditSession {
    /// Create a session over an initial path list
    pub fn new(paths: Vec<Path>, config: Arc<EditorConfig>) -> Self {
        let paths = Arc::new(paths);
        Self {
            undo: UndoState::new(paths.clone(), config.history_depth),
            paths,
            selection: Selection::new(),
            viewport: ViewPort::new(),
            config,
        }
    }

    /// Index of a path in z-order
    pub fn path_index(&self, id: EntityId) -> Option<usize> {
        self.paths.iter().position(|path| path.id == id)
    }

    pub fn path(&self, id: EntityId) -> Option<&Path> {
        self.paths.iter().find(|path| path.id == id)
    }

    /// Mutable access to a path, copying shared storage first
    pub fn path_mut(&mut self, id: EntityId) -> Option<&mut Path> {
        Arc::make_mut(&mut self.paths)
            .iter_mut()
            .find(|path| path.id == id)
    }

    /// Mutable access to the whole path list
    pub fn paths_mut(&mut self) -> &mut Vec<Path> {
        Arc::make_mut(&mut self.paths)
    }

    /// Selected paths in z-order
    pub fn selected_paths(&self) -> impl Iterator<Item = &Path> {
        self.paths
            .iter()
            .filter(|path| self.selection.contains_path(&path.id))
    }

    /// Hit radius converted to design units
    pub fn hit_radius(&self) -> f64 {
        self.viewport.screen_distance(self.config.tools.hit_radius)
    }

    /// Boolean engine configured with this session's sampling density
    pub fn boolean_engine(&self) -> BooleanEngine {
        BooleanEngine::new(self.config.samples_per_segment)
    }

    // ===== HISTORY =====

    /// Record the current paths as one completed gesture
    pub fn record_edit(&mut self) {
        self.undo.add_undo_group(self.paths.clone());
        tracing::debug!("Recorded snapshot with {} paths", self.paths.len());
    }

    /// Restore the previous snapshot; clears the selection
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.undo() else {
            return false;
        };
        self.paths = previous;
        self.selection.clear();
        tracing::debug!("Undo: restored previous state");
        true
    }

    /// Restore the next snapshot; clears the selection
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.undo.redo() else {
            return false;
        };
        self.paths = next;
        self.selection.clear();
        tracing::debug!("Redo: restored next state");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Replace the whole path list and start a fresh history
    pub fn load_paths(&mut self, paths: Vec<Path>) {
        self.paths = Arc::new(paths);
        self.selection.clear();
        self.undo.reset(self.paths.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Vec2};

    fn session_with_square() -> EditSession {
        let square = Path::polygon([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        EditSession::new(vec![square], Arc::new(EditorConfig::default()))
    }

    #[test]
    fn undo_and_redo_restore_committed_geometry() {
        let mut session = session_with_square();
        let id = session.paths[0].id;
        let mut committed = Vec::new();

        for step in 1..=4 {
            if let Some(path) = session.path_mut(id) {
                path.translate(Vec2::new(step as f64, 0.0));
            }
            session.record_edit();
            committed.push(session.paths.clone());
        }

        for _ in 0..4 {
            assert!(session.undo());
        }
        assert!(!session.undo());
        assert_eq!(session.paths[0].nodes[0].anchor, Point::new(0.0, 0.0));

        for _ in 0..4 {
            assert!(session.redo());
        }
        assert_eq!(*session.paths, *committed[3]);
    }

    #[test]
    fn undo_clears_selection() {
        let mut session = session_with_square();
        let id = session.paths[0].id;
        session.paths_mut().clear();
        session.record_edit();
        session.selection.insert_path(id);
        session.undo();
        assert!(session.selection.is_empty());
        assert_eq!(session.paths.len(), 1);
    }

    #[test]
    fn snapshots_are_independent_of_later_edits() {
        let mut session = session_with_square();
        let id = session.paths[0].id;
        session.record_edit();
        if let Some(path) = session.path_mut(id) {
            path.nodes[0].anchor = Point::new(-5.0, -5.0);
        }
        session.undo();
        assert_eq!(session.paths[0].nodes[0].anchor, Point::new(0.0, 0.0));
    }

    #[test]
    fn load_paths_resets_history() {
        let mut session = session_with_square();
        session.record_edit();
        session.load_paths(Vec::new());
        assert!(!session.can_undo());
        assert!(session.paths.is_empty());
    }
}
