// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Keyboard shortcuts for GlyphCanvas

use super::{Command, GlyphCanvas};
use crate::editing::Modifiers;
use crate::tools::{ShapeKind, ToolId};

/// Map a key press to an editor command
///
/// `key` is the logical key: a single character for printable keys, or a
/// name such as `"Delete"` or `"Escape"`.
pub fn shortcut_for(key: &str, mods: Modifiers) -> Option<Command> {
    if mods.command() {
        return match key.to_ascii_lowercase().as_str() {
            "z" if mods.shift => Some(Command::Redo),
            "z" => Some(Command::Undo),
            "y" => Some(Command::Redo),
            _ => None,
        };
    }

    let command = match key {
        "Delete" | "Backspace" => Command::Delete,
        "Escape" => Command::UndoLastPoint,
        "]" => Command::BringToFront,
        "[" => Command::SendToBack,
        "u" => Command::Union,
        "h" => Command::Hole,
        "v" => Command::SetTool(ToolId::Select),
        "p" => Command::SetTool(ToolId::Pen),
        "b" => Command::SetTool(ToolId::Brush),
        "r" => Command::SetTool(ToolId::Shapes(ShapeKind::Square)),
        "o" => Command::SetTool(ToolId::Shapes(ShapeKind::Circle)),
        _ => return None,
    };
    Some(command)
}

impl GlyphCanvas {
    /// Handle a key press; returns whether it was consumed
    pub fn key_down(&mut self, key: &str, mods: Modifiers) -> bool {
        let Some(command) = shortcut_for(key, mods) else {
            return false;
        };
        self.execute(command);
        true
    }
}
