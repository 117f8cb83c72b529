// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Shapes tool for inserting geometric presets
//!
//! Activating the tool drops a fixed-size square or circle in the middle of
//! the canvas, selects it, and hands control back to the select tool.

use crate::editing::{EditSession, MouseDelegate, Selection};
use crate::model::{Node, NodeKind, Path};
use crate::settings;
use crate::tools::{Tool, ToolId};
use kurbo::{Point, Vec2};

// ===== Shape Type =====

/// Type of preset shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Square,
    Circle,
}

// ===== ShapesTool Struct =====

/// The shapes tool
#[derive(Debug, Clone)]
pub struct ShapesTool {
    kind: ShapeKind,
}

impl ShapesTool {
    pub fn new(kind: ShapeKind) -> Self {
        Self { kind }
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.kind
    }
}

// ===== Tool Implementation =====

impl Tool for ShapesTool {
    fn id(&self) -> ToolId {
        ToolId::Shapes(self.kind)
    }

    fn activate(&mut self, session: &mut EditSession) -> Option<ToolId> {
        let center = session.config.canvas.center();
        let tools = session.config.tools;
        let path = match self.kind {
            ShapeKind::Square => square_path(center, tools.square_size),
            ShapeKind::Circle => circle_path(center, tools.circle_radius),
        };
        let id = session.add_path(path);
        session.selection = Selection::single_path(id);
        session.record_edit();
        tracing::debug!("Shapes tool: inserted {:?} at {:?}", self.kind, center);
        Some(ToolId::Select)
    }
}

impl MouseDelegate for ShapesTool {
    type Data = EditSession;
}

// ===== Presets =====

/// Closed square of corner nodes centered on `center`
pub fn square_path(center: Point, size: f64) -> Path {
    let half = size / 2.0;
    Path::polygon([
        center + Vec2::new(-half, -half),
        center + Vec2::new(half, -half),
        center + Vec2::new(half, half),
        center + Vec2::new(-half, half),
    ])
}

/// Closed bezier circle of four symmetric nodes centered on `center`
pub fn circle_path(center: Point, radius: f64) -> Path {
    let k = settings::shapes::CIRCLE_KAPPA * radius;
    // Top, right, bottom, left; each tangent points along the travel
    // direction (clockwise on a y-down canvas).
    let quadrants = [
        (Vec2::new(0.0, -radius), Vec2::new(k, 0.0)),
        (Vec2::new(radius, 0.0), Vec2::new(0.0, k)),
        (Vec2::new(0.0, radius), Vec2::new(-k, 0.0)),
        (Vec2::new(-radius, 0.0), Vec2::new(0.0, -k)),
    ];
    let nodes = quadrants
        .into_iter()
        .map(|(offset, tangent)| {
            let anchor = center + offset;
            Node::new(anchor, anchor - tangent, anchor + tangent, NodeKind::Symmetric)
        })
        .collect();
    Path::new(nodes, true)
}
