// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Tool system for glyph editing

pub mod brush;
pub mod pen;
pub mod select;
pub mod shapes;

pub use shapes::ShapeKind;

use crate::editing::{Drag, EditSession, MouseDelegate, MouseEvent};

// ===== Tool Identifier =====

/// Tool identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    /// Select and move paths, nodes and handles
    Select,
    /// Click-and-drag bezier pen
    Pen,
    /// Freehand ribbon brush
    Brush,
    /// Insert a preset shape, then return to Select
    Shapes(ShapeKind),
}

// ===== Tool Trait =====

/// A tool for editing glyphs
pub trait Tool: MouseDelegate<Data = EditSession> {
    /// Get the tool identifier
    fn id(&self) -> ToolId;

    /// Called when the tool becomes active
    ///
    /// Returning a tool id hands control straight to that tool.
    fn activate(&mut self, _session: &mut EditSession) -> Option<ToolId> {
        None
    }

    /// Called before another tool takes over
    fn deactivate(&mut self, _session: &mut EditSession) {}
}

// ===== ToolBox Enum =====

/// Enum wrapping all tool types
#[derive(Debug, Clone)]
pub enum ToolBox {
    Select(select::SelectTool),
    Pen(pen::PenTool),
    Brush(brush::BrushTool),
    Shapes(shapes::ShapesTool),
}

impl Default for ToolBox {
    fn default() -> Self {
        Self::for_id(ToolId::Select)
    }
}

// ===== ToolBox Implementation =====

impl ToolBox {
    /// Create a tool by ID
    pub fn for_id(id: ToolId) -> Self {
        match id {
            ToolId::Select => ToolBox::Select(select::SelectTool::default()),
            ToolId::Pen => ToolBox::Pen(pen::PenTool::default()),
            ToolId::Brush => ToolBox::Brush(brush::BrushTool::default()),
            ToolId::Shapes(kind) => ToolBox::Shapes(shapes::ShapesTool::new(kind)),
        }
    }

    /// Get the tool ID
    pub fn id(&self) -> ToolId {
        self.as_tool().id()
    }

    fn as_tool(&self) -> &dyn Tool {
        match self {
            ToolBox::Select(tool) => tool,
            ToolBox::Pen(tool) => tool,
            ToolBox::Brush(tool) => tool,
            ToolBox::Shapes(tool) => tool,
        }
    }

    fn as_tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            ToolBox::Select(tool) => tool,
            ToolBox::Pen(tool) => tool,
            ToolBox::Brush(tool) => tool,
            ToolBox::Shapes(tool) => tool,
        }
    }

    pub fn activate(&mut self, session: &mut EditSession) -> Option<ToolId> {
        self.as_tool_mut().activate(session)
    }

    pub fn deactivate(&mut self, session: &mut EditSession) {
        self.as_tool_mut().deactivate(session);
    }

    /// Remove the most recent pen node; only meaningful for the pen
    pub fn undo_last_point(&mut self, session: &mut EditSession) -> bool {
        match self {
            ToolBox::Pen(tool) => tool.undo_last_point(session),
            _ => false,
        }
    }
}

// ===== MouseDelegate Implementation =====

/// Implement MouseDelegate for ToolBox so it can be used with the Mouse
/// state machine
impl MouseDelegate for ToolBox {
    type Data = EditSession;

    fn mouse_moved(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.as_tool_mut().mouse_moved(event, data);
    }

    fn left_down(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.as_tool_mut().left_down(event, data);
    }

    fn left_up(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.as_tool_mut().left_up(event, data);
    }

    fn left_click(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.as_tool_mut().left_click(event, data);
    }

    fn left_drag_began(&mut self, event: MouseEvent, drag: Drag, data: &mut EditSession) {
        self.as_tool_mut().left_drag_began(event, drag, data);
    }

    fn left_drag_changed(&mut self, event: MouseEvent, drag: Drag, data: &mut EditSession) {
        self.as_tool_mut().left_drag_changed(event, drag, data);
    }

    fn left_drag_ended(&mut self, event: MouseEvent, drag: Drag, data: &mut EditSession) {
        self.as_tool_mut().left_drag_ended(event, drag, data);
    }

    fn cancel(&mut self, data: &mut EditSession) {
        self.as_tool_mut().cancel(data);
    }
}
