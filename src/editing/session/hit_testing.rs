// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Hit testing methods for EditSession

use super::EditSession;
use crate::editing::selection::NodeRef;
use crate::model::{EntityId, HandleSide, Path};
use crate::sampling;
use kurbo::{Line, ParamCurveNearest, Point};

/// What lies under the pointer, in priority order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    /// An extended handle of a node on a selected path
    Handle { node: NodeRef, side: HandleSide },
    /// A node anchor
    Node(NodeRef),
    /// The filled body (or, for open paths, the stroke) of a path
    PathBody(EntityId),
}

impl EditSession {
    /// Find what lies under a design-space position
    ///
    /// Handles of selected paths win over anchors, anchors over path
    /// bodies. Within each class the topmost path wins, and within a path
    /// the closest point.
    pub fn hit_test(&self, pos: Point) -> Option<HitTarget> {
        let radius = self.hit_radius();
        let hit = self
            .hit_test_handles(pos, radius)
            .or_else(|| self.hit_test_nodes(pos, radius))
            .or_else(|| self.hit_test_bodies(pos, radius));
        tracing::debug!("[hit_test] pos=({:.1}, {:.1}) -> {:?}", pos.x, pos.y, hit);
        hit
    }

    /// Closest anchor of one path within the hit radius
    pub fn hit_test_path_nodes(&self, id: EntityId, pos: Point) -> Option<usize> {
        let path = self.path(id)?;
        closest(
            path.nodes
                .iter()
                .enumerate()
                .map(|(index, node)| (index, node.anchor)),
            pos,
            self.hit_radius(),
        )
    }

    fn hit_test_handles(&self, pos: Point, radius: f64) -> Option<HitTarget> {
        self.paths
            .iter()
            .rev()
            .filter(|path| self.selection.contains_path(&path.id))
            .find_map(|path| {
                let candidates = path.nodes.iter().enumerate().flat_map(|(index, node)| {
                    [HandleSide::In, HandleSide::Out]
                        .into_iter()
                        .filter(move |side| !node.is_handle_retracted(*side))
                        .map(move |side| ((index, side), node.handle(side)))
                });
                closest(candidates, pos, radius).map(|(index, side)| HitTarget::Handle {
                    node: NodeRef::new(path.id, index),
                    side,
                })
            })
    }

    fn hit_test_nodes(&self, pos: Point, radius: f64) -> Option<HitTarget> {
        self.paths.iter().rev().find_map(|path| {
            let candidates = path
                .nodes
                .iter()
                .enumerate()
                .map(|(index, node)| (index, node.anchor));
            closest(candidates, pos, radius).map(|index| HitTarget::Node(NodeRef::new(path.id, index)))
        })
    }

    fn hit_test_bodies(&self, pos: Point, radius: f64) -> Option<HitTarget> {
        let samples = self.config.samples_per_segment;
        self.paths
            .iter()
            .rev()
            .find(|path| body_contains(path, pos, radius, samples))
            .map(|path| HitTarget::PathBody(path.id))
    }
}

/// Closed paths are hit inside their even-odd fill, open paths near
/// their stroke
fn body_contains(path: &Path, pos: Point, radius: f64, samples: usize) -> bool {
    let ring = sampling::sample_path(path, samples);
    if ring.is_empty() {
        return false;
    }
    if path.closed {
        return sampling::ring_contains(&ring, pos);
    }
    // The ring of an open path closes back to the start; skip that edge.
    ring[..ring.len() - 1].windows(2).any(|pair| {
        let line = Line::new(pair[0], pair[1]);
        line.nearest(pos, 1e-9).distance_sq <= radius * radius
    })
}

fn closest<K>(candidates: impl Iterator<Item = (K, Point)>, pos: Point, radius: f64) -> Option<K> {
    candidates
        .map(|(key, point)| (key, (point - pos).hypot()))
        .filter(|(_, distance)| *distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key)
}
