// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Path nodes: an on-curve anchor plus two absolute control handles.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether a handle is retracted onto its
/// anchor or whether three points are collinear.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// Handle coupling mode of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Handles move independently
    #[default]
    Cusp,
    /// Handles stay collinear through the anchor, lengths independent
    Smooth,
    /// Handles stay collinear and equally long
    Symmetric,
}

impl NodeKind {
    /// Whether moving one handle must re-derive the other
    pub fn is_coupled(self) -> bool {
        !matches!(self, NodeKind::Cusp)
    }
}

/// Which of the two handles of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandleSide {
    /// Control point of the segment arriving at the anchor
    In,
    /// Control point of the segment leaving the anchor
    Out,
}

impl HandleSide {
    pub fn opposite(self) -> Self {
        match self {
            HandleSide::In => HandleSide::Out,
            HandleSide::Out => HandleSide::In,
        }
    }
}

/// A single node of a path
///
/// Handles are absolute world coordinates, not offsets from the anchor. A
/// handle that coincides with its anchor is retracted; a segment whose two
/// adjoining handles are both retracted is a straight line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub anchor: Point,
    pub handle_in: Point,
    pub handle_out: Point,
    #[serde(default)]
    pub kind: NodeKind,
}

impl Node {
    /// Create a node with explicit handles
    pub fn new(anchor: Point, handle_in: Point, handle_out: Point, kind: NodeKind) -> Self {
        Self {
            anchor,
            handle_in,
            handle_out,
            kind,
        }
    }

    /// Create a cusp node with both handles retracted
    pub fn corner(anchor: Point) -> Self {
        Self::new(anchor, anchor, anchor, NodeKind::Cusp)
    }

    /// Get one of the two handles
    pub fn handle(&self, side: HandleSide) -> Point {
        match side {
            HandleSide::In => self.handle_in,
            HandleSide::Out => self.handle_out,
        }
    }

    /// Mutable access to one of the two handles
    pub fn handle_mut(&mut self, side: HandleSide) -> &mut Point {
        match side {
            HandleSide::In => &mut self.handle_in,
            HandleSide::Out => &mut self.handle_out,
        }
    }

    pub fn is_handle_retracted(&self, side: HandleSide) -> bool {
        points_coincide(self.handle(side), self.anchor)
    }

    /// Translate the anchor together with both handles
    pub fn translate(&mut self, delta: Vec2) {
        self.anchor += delta;
        self.handle_in += delta;
        self.handle_out += delta;
    }
}

/// Whether two points are equal within `GEOMETRY_EPSILON`
pub fn points_coincide(a: Point, b: Point) -> bool {
    (a - b).hypot() <= GEOMETRY_EPSILON
}

/// Classify a node from its geometry.
///
/// Both handles extended and pointing in opposite directions gives a smooth
/// node, anything else (including retracted handles) is a cusp.
pub fn classify_kind(handle_in: Point, anchor: Point, handle_out: Point) -> NodeKind {
    let incoming = handle_in - anchor;
    let outgoing = handle_out - anchor;
    let (len_in, len_out) = (incoming.hypot(), outgoing.hypot());
    if len_in <= GEOMETRY_EPSILON || len_out <= GEOMETRY_EPSILON {
        return NodeKind::Cusp;
    }
    let cross = incoming.cross(outgoing) / (len_in * len_out);
    let dot = incoming.dot(outgoing);
    if cross.abs() <= 1e-3 && dot < 0.0 {
        NodeKind::Smooth
    } else {
        NodeKind::Cusp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_node_has_retracted_handles() {
        let node = Node::corner(Point::new(10.0, 20.0));
        assert!(node.is_handle_retracted(HandleSide::In));
        assert!(node.is_handle_retracted(HandleSide::Out));
        assert_eq!(node.kind, NodeKind::Cusp);
    }

    #[test]
    fn translate_moves_handles() {
        let mut node = Node::new(
            Point::new(0.0, 0.0),
            Point::new(-5.0, 0.0),
            Point::new(5.0, 0.0),
            NodeKind::Smooth,
        );
        node.translate(Vec2::new(1.0, 2.0));
        assert_eq!(node.anchor, Point::new(1.0, 2.0));
        assert_eq!(node.handle_in, Point::new(-4.0, 2.0));
        assert_eq!(node.handle_out, Point::new(6.0, 2.0));
    }

    #[test]
    fn classify_collinear_handles_as_smooth() {
        let anchor = Point::new(0.0, 0.0);
        assert_eq!(
            classify_kind(Point::new(-3.0, -3.0), anchor, Point::new(6.0, 6.0)),
            NodeKind::Smooth
        );
        assert_eq!(
            classify_kind(Point::new(-3.0, 0.0), anchor, Point::new(0.0, 6.0)),
            NodeKind::Cusp
        );
        assert_eq!(classify_kind(anchor, anchor, Point::new(1.0, 0.0)), NodeKind::Cusp);
    }

    #[test]
    fn node_kind_serializes_lowercase() {
        let json = serde_json::to_string(&NodeKind::Symmetric).unwrap();
        assert_eq!(json, "\"symmetric\"");
    }
}
