// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Viewport transformation between screen and design coordinates.
//!
//! Both spaces are y-down; the viewport only pans and zooms.

use kurbo::{Affine, Point, Vec2};

/// Minimum and maximum zoom factors
const MIN_ZOOM: f64 = 0.05;
const MAX_ZOOM: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPort {
    /// Screen position of the design-space origin
    pub offset: Vec2,
    /// Screen pixels per design unit
    pub zoom: f64,
}

impl Default for ViewPort {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewPort {
    pub fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Design-to-screen transform, for hosts that paint
    pub fn affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    pub fn screen_to_design(&self, point: Point) -> Point {
        ((point - self.offset).to_vec2() / self.zoom).to_point()
    }

    pub fn design_to_screen(&self, point: Point) -> Point {
        (point.to_vec2() * self.zoom + self.offset).to_point()
    }

    /// Convert a screen-pixel distance to design units
    pub fn screen_distance(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }

    /// Pan by a screen-space delta
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom around a fixed screen point
    pub fn zoom_at(&mut self, screen_anchor: Point, factor: f64) {
        let design_anchor = self.screen_to_design(screen_anchor);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = screen_anchor.to_vec2() - design_anchor.to_vec2() * self.zoom;
    }
}
