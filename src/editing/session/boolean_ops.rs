// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Weld (union) and punch (hole) over the selected paths

use super::EditSession;
use crate::editing::selection::Selection;
use crate::model::Path;

impl EditSession {
    /// Replace the selected paths with their union
    ///
    /// The merged paths are appended on top and become the selection.
    /// Fewer than two selected paths is a no-op.
    pub fn union_selected(&mut self) -> bool {
        let selected: Vec<Path> = self.selected_paths().cloned().collect();
        if selected.len() < 2 {
            return false;
        }

        let merged = self.boolean_engine().union(&selected);
        let selection = self.selection.clone();
        let paths = self.paths_mut();
        paths.retain(|path| !selection.contains_path(&path.id));

        let mut new_selection = Selection::new();
        for path in &merged {
            new_selection.insert_path(path.id);
        }
        tracing::info!(
            "Union of {} paths produced {} paths",
            selected.len(),
            merged.len()
        );
        paths.extend(merged);
        self.selection = new_selection;
        self.record_edit();
        true
    }

    /// Punch the topmost selected path out of every other selected path
    ///
    /// Each target is replaced in place by its pieces; a target that is
    /// entirely covered disappears. The cutter is removed.
    pub fn hole_selected(&mut self) -> bool {
        let selected: Vec<Path> = self.selected_paths().cloned().collect();
        let Some((cutter, targets)) = selected.split_last() else {
            return false;
        };
        if targets.is_empty() {
            return false;
        }

        let engine = self.boolean_engine();
        let mut new_selection = Selection::new();
        let mut result = Vec::with_capacity(self.paths.len());
        for path in self.paths.iter() {
            if path.id == cutter.id {
                continue;
            }
            if !targets.iter().any(|target| target.id == path.id) {
                result.push(path.clone());
                continue;
            }
            let pieces = engine.difference(path, cutter);
            tracing::debug!("Hole split path {} into {} pieces", path.id, pieces.len());
            for piece in &pieces {
                new_selection.insert_path(piece.id);
            }
            result.extend(pieces);
        }

        tracing::info!("Punched hole through {} paths", targets.len());
        *self.paths_mut() = result;
        self.selection = new_selection;
        self.record_edit();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::sampling::{rings_cover, sample_paths};
    use kurbo::Point;
    use std::sync::Arc;

    fn square(min: f64, size: f64) -> Path {
        Path::polygon([
            Point::new(min, min),
            Point::new(min + size, min),
            Point::new(min + size, min + size),
            Point::new(min, min + size),
        ])
    }

    fn session(paths: Vec<Path>) -> EditSession {
        EditSession::new(paths, Arc::new(EditorConfig::default()))
    }

    #[test]
    fn union_replaces_selection_and_records_history() {
        let a = square(0.0, 100.0);
        let b = square(50.0, 100.0);
        let untouched = square(500.0, 10.0);
        let (a_id, b_id, other_id) = (a.id, b.id, untouched.id);
        let mut session = session(vec![a, untouched, b]);
        session.selection.insert_path(a_id);
        session.selection.insert_path(b_id);

        assert!(session.union_selected());
        assert_eq!(session.paths.len(), 2);
        assert_eq!(session.paths[0].id, other_id);
        let merged = &session.paths[1];
        assert!(session.selection.contains_path(&merged.id));
        assert_eq!(session.selection.path_count(), 1);
        assert!(session.can_undo());

        session.undo();
        assert_eq!(session.paths.len(), 3);
    }

    #[test]
    fn union_needs_two_paths() {
        let a = square(0.0, 100.0);
        let a_id = a.id;
        let mut session = session(vec![a]);
        session.selection.insert_path(a_id);
        assert!(!session.union_selected());
        assert!(!session.can_undo());
    }

    #[test]
    fn hole_uses_topmost_selected_as_cutter() {
        let outer = square(0.0, 100.0);
        let inner = square(25.0, 50.0);
        let (outer_id, inner_id) = (outer.id, inner.id);
        let mut session = session(vec![outer, inner]);
        session.selection.insert_path(outer_id);
        session.selection.insert_path(inner_id);

        assert!(session.hole_selected());
        assert!(session.path(inner_id).is_none());
        assert!(session.path(outer_id).is_none());

        let rings = sample_paths(session.paths.iter(), 30);
        assert!(rings_cover(&rings, Point::new(10.0, 10.0)));
        assert!(!rings_cover(&rings, Point::new(50.0, 50.0)));
        assert!(session.can_undo());
    }

    #[test]
    fn hole_keeps_target_position_in_z_order() {
        let bottom = square(500.0, 10.0);
        let target = square(0.0, 100.0);
        let top = square(600.0, 10.0);
        let cutter = square(-10.0, 200.0);
        let (target_id, cutter_id, bottom_id, top_id) = (target.id, cutter.id, bottom.id, top.id);
        let mut session = session(vec![bottom, target, top, cutter]);
        session.selection.insert_path(target_id);
        session.selection.insert_path(cutter_id);

        assert!(session.hole_selected());
        let order: Vec<_> = session.paths.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![bottom_id, top_id]);
    }
}
