// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer event handlers for GlyphCanvas

use super::GlyphCanvas;
use crate::editing::{MouseButton, MouseEvent};

impl GlyphCanvas {
    // ============================================================================
    // POINTER EVENT HANDLERS
    // ============================================================================

    /// Handle pointer down (screen coordinates)
    pub fn pointer_down(&mut self, event: MouseEvent) {
        tracing::debug!(
            "[GlyphCanvas] Down at {:?}, button {:?}, tool {:?}",
            event.pos,
            event.button,
            self.tool.id()
        );

        if Self::starts_pan(&event) {
            self.pan_anchor = Some(event.pos);
            return;
        }
        self.mouse
            .mouse_down(event, &mut self.tool, &mut self.session);
    }

    /// Handle pointer move (screen coordinates)
    pub fn pointer_move(&mut self, event: MouseEvent) {
        if let Some(anchor) = self.pan_anchor {
            self.session.viewport.pan(event.pos - anchor);
            self.pan_anchor = Some(event.pos);
            return;
        }
        self.mouse
            .mouse_moved(event, &mut self.tool, &mut self.session);
    }

    /// Handle pointer up (screen coordinates)
    ///
    /// Hosts should forward window-level releases here too, so a drag that
    /// ends outside the canvas still completes.
    pub fn pointer_up(&mut self, event: MouseEvent) {
        if self.pan_anchor.take().is_some() {
            tracing::debug!("[GlyphCanvas] Pan ended at {:?}", self.session.viewport.offset);
            return;
        }
        self.mouse.mouse_up(event, &mut self.tool, &mut self.session);
    }

    /// Handle the pointer leaving the canvas: commit whatever is held
    pub fn pointer_leave(&mut self) {
        if self.is_busy() {
            tracing::debug!("[GlyphCanvas] Pointer left during a gesture, committing");
        }
        self.finish_gesture();
    }

    /// Middle button, or left button with alt held, pans
    fn starts_pan(event: &MouseEvent) -> bool {
        match event.button {
            MouseButton::Middle => true,
            MouseButton::Left => event.mods.alt,
            MouseButton::Right => false,
        }
    }
}
