// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Editable contours made of [`Node`]s.

use super::entity_id::EntityId;
use super::node::{HandleSide, Node};
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};

/// A single contour of a glyph
///
/// Node order encodes winding. Holes are rendered with the even-odd rule
/// across all contours of a glyph, so `is_hole` is advisory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    /// Transient identifier, regenerated on load
    #[serde(skip, default)]
    pub id: EntityId,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub is_hole: bool,
    /// Cosmetic fill color (CSS syntax), not used by the compiler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

/// One bezier segment between two consecutive nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub control_out: Point,
    pub control_in: Point,
    pub end: Point,
}

impl Segment {
    fn between(from: &Node, to: &Node) -> Self {
        Self {
            start: from.anchor,
            control_out: from.handle_out,
            control_in: to.handle_in,
            end: to.anchor,
        }
    }

    /// Straight when both adjoining handles coincide with their anchors
    pub fn is_straight(&self) -> bool {
        super::node::points_coincide(self.control_out, self.start)
            && super::node::points_coincide(self.control_in, self.end)
    }

    pub fn to_cubic(&self) -> kurbo::CubicBez {
        kurbo::CubicBez::new(self.start, self.control_out, self.control_in, self.end)
    }
}

impl Path {
    /// Create a path from nodes with a fresh id
    pub fn new(nodes: Vec<Node>, closed: bool) -> Self {
        Self {
            id: EntityId::next(),
            nodes,
            closed,
            is_hole: false,
            fill: None,
        }
    }

    /// Start an open path with a single corner node
    pub fn open_at(point: Point) -> Self {
        Self::new(vec![Node::corner(point)], false)
    }

    /// Create a closed polygon of corner nodes
    pub fn polygon(points: impl IntoIterator<Item = Point>) -> Self {
        Self::new(points.into_iter().map(Node::corner).collect(), true)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Paths with fewer than two nodes carry no outline and get dropped
    pub fn is_degenerate(&self) -> bool {
        self.nodes.len() < 2
    }

    /// Iterate the segments of this path, including the closing segment
    /// of a closed path
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let len = self.nodes.len();
        let count = match (len, self.closed) {
            (0 | 1, _) => 0,
            (n, true) => n,
            (n, false) => n - 1,
        };
        (0..count).map(move |i| Segment::between(&self.nodes[i], &self.nodes[(i + 1) % len]))
    }

    /// Translate every anchor and handle
    pub fn translate(&mut self, delta: Vec2) {
        for node in &mut self.nodes {
            node.translate(delta);
        }
    }

    /// Every anchor and extended handle of this path
    pub fn control_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().flat_map(|node| {
            let handles = [HandleSide::In, HandleSide::Out]
                .into_iter()
                .filter(move |side| !node.is_handle_retracted(*side))
                .map(move |side| node.handle(side));
            std::iter::once(node.anchor).chain(handles)
        })
    }

    /// Convert to a kurbo `BezPath` in editor space
    pub fn to_bezpath(&self) -> BezPath {
        let mut bez = BezPath::new();
        let Some(first) = self.nodes.first() else {
            return bez;
        };
        bez.move_to(first.anchor);
        for segment in self.segments() {
            if segment.is_straight() {
                bez.line_to(segment.end);
            } else {
                bez.curve_to(segment.control_out, segment.control_in, segment.end);
            }
        }
        if self.closed {
            bez.close_path();
        }
        bez
    }

    /// Position of a handle, if the node exists
    pub fn handle(&self, node: usize, side: HandleSide) -> Option<Point> {
        self.nodes.get(node).map(|n| n.handle(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::NodeKind;

    fn triangle() -> Path {
        Path::polygon([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ])
    }

    #[test]
    fn closed_path_has_wraparound_segment() {
        let path = triangle();
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].end, Point::new(0.0, 0.0));
        assert!(segments.iter().all(Segment::is_straight));
    }

    #[test]
    fn open_path_has_no_closing_segment() {
        let mut path = triangle();
        path.closed = false;
        assert_eq!(path.segments().count(), 2);
    }

    #[test]
    fn single_node_path_is_degenerate() {
        let path = Path::open_at(Point::new(3.0, 4.0));
        assert!(path.is_degenerate());
        assert_eq!(path.segments().count(), 0);
    }

    #[test]
    fn curved_segment_emits_curve() {
        let mut path = triangle();
        path.nodes[0].handle_out = Point::new(5.0, -5.0);
        path.nodes[0].kind = NodeKind::Cusp;
        let bez = path.to_bezpath();
        let curves = bez
            .elements()
            .iter()
            .filter(|el| matches!(el, kurbo::PathEl::CurveTo(..)))
            .count();
        assert_eq!(curves, 1);
    }

    #[test]
    fn control_points_skip_retracted_handles() {
        let mut path = triangle();
        assert_eq!(path.control_points().count(), 3);
        path.nodes[1].handle_out = Point::new(12.0, 4.0);
        assert_eq!(path.control_points().count(), 4);
    }

    #[test]
    fn ids_are_not_serialized() {
        let path = triangle();
        let json = serde_json::to_string(&path).unwrap();
        assert!(!json.contains("\"id\""));
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_ne!(back.id, path.id);
        assert_eq!(back.nodes, path.nodes);
        assert!(back.closed);
    }
}
