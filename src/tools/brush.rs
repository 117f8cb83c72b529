// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Brush tool: freehand ribbons
//!
//! The pointer is sampled into a centerline. Every move rebuilds the whole
//! ribbon: each sample is pushed out to both sides along the normal of its
//! local tangent, and the left rail followed by the reversed right rail
//! forms one closed contour. On release the corner nodes are smoothed.

use crate::editing::{Drag, EditSession, MouseDelegate, MouseEvent, Selection};
use crate::model::node::GEOMETRY_EPSILON;
use crate::model::{EntityId, Node, NodeKind, Path};
use crate::tools::{Tool, ToolId};
use kurbo::{Point, Vec2};

/// A stroke in progress
#[derive(Debug, Clone)]
struct Stroke {
    samples: Vec<Point>,
    /// Ribbon path, once the stroke has two samples
    path: Option<EntityId>,
}

/// The brush tool
#[derive(Debug, Clone, Default)]
pub struct BrushTool {
    stroke: Option<Stroke>,
}

impl BrushTool {
    fn add_sample(&mut self, screen_pos: Point, session: &mut EditSession) {
        let Some(stroke) = self.stroke.as_mut() else {
            return;
        };
        let pos = session.viewport.screen_to_design(screen_pos);
        let min_spacing = session.config.tools.brush_min_spacing;
        if stroke
            .samples
            .last()
            .is_some_and(|last| (pos - *last).hypot() < min_spacing.max(GEOMETRY_EPSILON))
        {
            return;
        }
        stroke.samples.push(pos);

        let nodes = ribbon_outline(&stroke.samples, session.config.tools.brush_width);
        if nodes.len() < 4 {
            return;
        }
        match stroke.path.and_then(|id| session.path_mut(id)) {
            Some(path) => path.nodes = nodes,
            None => {
                let id = session.add_path(Path::new(nodes, true));
                stroke.path = Some(id);
            }
        }
    }

    /// Smooth the ribbon and record it, or drop a stroke that is too short
    fn commit(&mut self, session: &mut EditSession) {
        let Some(stroke) = self.stroke.take() else {
            return;
        };
        let Some(id) = stroke.path else {
            tracing::debug!("Brush tool: dropped stroke with fewer than two samples");
            return;
        };
        let tension = session.config.tools.brush_tension;
        if let Some(path) = session.path_mut(id) {
            smooth_closed(&mut path.nodes, tension);
        }
        session.selection = Selection::single_path(id);
        session.record_edit();
        tracing::debug!("Brush tool: committed stroke of {} samples", stroke.samples.len());
    }
}

impl Tool for BrushTool {
    fn id(&self) -> ToolId {
        ToolId::Brush
    }

    fn deactivate(&mut self, session: &mut EditSession) {
        self.commit(session);
    }
}

impl MouseDelegate for BrushTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        let pos = session.viewport.screen_to_design(event.pos);
        self.stroke = Some(Stroke {
            samples: vec![pos],
            path: None,
        });
    }

    fn left_drag_began(&mut self, _event: MouseEvent, drag: Drag, session: &mut EditSession) {
        self.add_sample(drag.current, session);
    }

    fn left_drag_changed(&mut self, _event: MouseEvent, drag: Drag, session: &mut EditSession) {
        self.add_sample(drag.current, session);
    }

    fn left_up(&mut self, _event: MouseEvent, session: &mut EditSession) {
        self.commit(session);
    }

    fn cancel(&mut self, session: &mut EditSession) {
        self.commit(session);
    }
}

/// Build the closed ribbon around a centerline
///
/// Returns the left rail in sample order followed by the right rail in
/// reverse, as corner nodes. Fewer than two samples give no outline.
pub fn ribbon_outline(samples: &[Point], width: f64) -> Vec<Node> {
    if samples.len() < 2 {
        return Vec::new();
    }
    let half = width / 2.0;
    let last = samples.len() - 1;
    let mut left = Vec::with_capacity(samples.len());
    let mut right = Vec::with_capacity(samples.len());
    let mut tangent = Vec2::new(1.0, 0.0);

    for (i, sample) in samples.iter().enumerate() {
        let prev = samples[i.saturating_sub(1)];
        let next = samples[(i + 1).min(last)];
        let local = next - prev;
        // Keep the previous direction where neighbors coincide.
        if local.hypot() > GEOMETRY_EPSILON {
            tangent = local.normalize();
        }
        let normal = Vec2::new(-tangent.y, tangent.x);
        left.push(Node::corner(*sample + normal * half));
        right.push(Node::corner(*sample - normal * half));
    }

    left.extend(right.into_iter().rev());
    left
}

/// Give every node of a closed contour smooth handles from its neighbors
///
/// Each handle sits `tension` times the chord between the two neighbors
/// away from the anchor, in the chord's direction.
pub fn smooth_closed(nodes: &mut [Node], tension: f64) {
    let len = nodes.len();
    if len < 3 {
        return;
    }
    let anchors: Vec<Point> = nodes.iter().map(|node| node.anchor).collect();
    for (i, node) in nodes.iter_mut().enumerate() {
        let prev = anchors[(i + len - 1) % len];
        let next = anchors[(i + 1) % len];
        let offset = (next - prev) * tension;
        node.handle_in = node.anchor - offset;
        node.handle_out = node.anchor + offset;
        node.kind = if offset.hypot() > GEOMETRY_EPSILON {
            NodeKind::Smooth
        } else {
            NodeKind::Cusp
        };
    }
}
