// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Built-in defaults for the editor and the compiler.
//!
//! These are the values `EditorConfig` falls back to when a field is missing
//! from `glyphforge.toml`. Code that needs a tunable value reads it from the
//! config; only true constants are used directly.

// ============================================================================
// CANVAS SETTINGS
// ============================================================================
/// Canvas width in editor units
const CANVAS_WIDTH: f64 = 1000.0;

/// Canvas height in editor units (one em)
const CANVAS_HEIGHT: f64 = 1000.0;

/// Baseline position measured from the top of the canvas
const CANVAS_BASELINE: f64 = 800.0;

// ============================================================================
// SAMPLING SETTINGS
// ============================================================================
/// Points evaluated per curved segment when flattening paths
const SAMPLES_PER_SEGMENT: usize = 30;

// ============================================================================
// FONT METRICS
// ============================================================================
const UNITS_PER_EM: u16 = 1000;
const ASCENDER: i16 = 800;
const DESCENDER: i16 = -200;

/// Smallest advance width an auto-spaced glyph can get
const MIN_ADVANCE_WIDTH: f64 = 200.0;

/// Right side margin added after the outline and the letter spacing
const ADVANCE_MARGIN: f64 = 50.0;

/// Advance width of the `.notdef` placeholder
const NOTDEF_ADVANCE_WIDTH: f64 = 500.0;

/// Maximum distance between a cubic and its quadratic approximation
const QUADRATIC_TOLERANCE: f64 = 1.0;

// ============================================================================
// TOOL SETTINGS
// ============================================================================
/// Ribbon width of the brush tool
const BRUSH_WIDTH: f64 = 24.0;

/// Pointer samples closer than this to the previous one are skipped
const BRUSH_MIN_SPACING: f64 = 2.0;

/// Fraction of the neighbor chord used for smoothed brush handles
const BRUSH_TENSION: f64 = 1.0 / 6.0;

/// Side length of the square preset
const SQUARE_SIZE: f64 = 300.0;

/// Radius of the circle preset
const CIRCLE_RADIUS: f64 = 150.0;

/// Handle length factor for a four-segment bezier circle
const CIRCLE_KAPPA: f64 = 0.5523;

// ============================================================================
// INTERACTION SETTINGS
// ============================================================================
/// Hit radius around anchors and handles, in screen pixels
const HIT_RADIUS: f64 = 8.0;

/// Pointer travel before a press becomes a drag, in screen pixels
const DRAG_THRESHOLD: f64 = 3.0;

/// Maximum number of history snapshots kept per glyph
const HISTORY_DEPTH: usize = 100;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Canvas geometry
pub mod canvas {
    pub const WIDTH: f64 = super::CANVAS_WIDTH;
    pub const HEIGHT: f64 = super::CANVAS_HEIGHT;
    pub const BASELINE: f64 = super::CANVAS_BASELINE;
}

/// Curve flattening
pub mod sampling {
    pub const SAMPLES_PER_SEGMENT: usize = super::SAMPLES_PER_SEGMENT;
}

/// Compiled font metrics and spacing
pub mod metrics {
    pub const UNITS_PER_EM: u16 = super::UNITS_PER_EM;
    pub const ASCENDER: i16 = super::ASCENDER;
    pub const DESCENDER: i16 = super::DESCENDER;
    pub const MIN_ADVANCE_WIDTH: f64 = super::MIN_ADVANCE_WIDTH;
    pub const ADVANCE_MARGIN: f64 = super::ADVANCE_MARGIN;
    pub const NOTDEF_ADVANCE_WIDTH: f64 = super::NOTDEF_ADVANCE_WIDTH;
    pub const QUADRATIC_TOLERANCE: f64 = super::QUADRATIC_TOLERANCE;
}

/// Brush tool
pub mod brush {
    pub const WIDTH: f64 = super::BRUSH_WIDTH;
    pub const MIN_SPACING: f64 = super::BRUSH_MIN_SPACING;
    pub const TENSION: f64 = super::BRUSH_TENSION;
}

/// Shape presets
pub mod shapes {
    pub const SQUARE_SIZE: f64 = super::SQUARE_SIZE;
    pub const CIRCLE_RADIUS: f64 = super::CIRCLE_RADIUS;
    pub const CIRCLE_KAPPA: f64 = super::CIRCLE_KAPPA;
}

/// Pointer interaction and history
pub mod interaction {
    pub const HIT_RADIUS: f64 = super::HIT_RADIUS;
    pub const DRAG_THRESHOLD: f64 = super::DRAG_THRESHOLD;
    pub const HISTORY_DEPTH: usize = super::HISTORY_DEPTH;
}
