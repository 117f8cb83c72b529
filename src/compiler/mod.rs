// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Font compiler: glyph map to an installable font.
//!
//! Editor outlines are flipped into font space, oriented for nonzero
//! filling, given advance widths, and handed to a [`FontAssembler`] as one
//! glyph table. The default assembler writes TrueType through `write-fonts`.

mod assembler;

pub use assembler::{FontAssembler, TrueTypeAssembler};

use crate::config::{CanvasConfig, EditorConfig, FontConfig};
use crate::model::{Glyph, GlyphMap, Path};
use crate::sampling::{self, sample_path};
use crate::settings;
use kurbo::{Affine, BezPath, Rect, Shape};
use thiserror::Error;

/// Reasons a compile fails; editing state is never touched
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Font name must not be empty")]
    InvalidName,

    #[error("Invalid font metrics: {0}")]
    InvalidMetrics(String),

    #[error("Font assembly failed: {0}")]
    Assembler(String),
}

/// Vertical metrics written to the font, in font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
}

/// One entry of the compiled glyph table
#[derive(Debug, Clone)]
pub struct GlyphOutline {
    /// `None` for `.notdef`
    pub codepoint: Option<char>,
    pub name: String,
    /// Outline in font units, y up
    pub outline: BezPath,
    pub advance_width: u16,
}

impl GlyphOutline {
    /// Outline bounds, or a zero rect for an empty outline
    pub fn bounds(&self) -> Rect {
        if self.outline.elements().is_empty() {
            Rect::ZERO
        } else {
            self.outline.bounding_box()
        }
    }
}

/// Compiles a glyph map with a configured assembler
pub struct FontCompiler<A = TrueTypeAssembler> {
    font: FontConfig,
    canvas: CanvasConfig,
    assembler: A,
}

impl FontCompiler {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_assembler(config, TrueTypeAssembler::new(config.font.quadratic_tolerance))
    }
}

impl<A: FontAssembler> FontCompiler<A> {
    pub fn with_assembler(config: &EditorConfig, assembler: A) -> Self {
        Self {
            font: config.font,
            canvas: config.canvas,
            assembler,
        }
    }

    /// Compile every glyph with an outline into font bytes
    pub fn compile(&self, glyphs: &GlyphMap, name: &str) -> Result<Vec<u8>, CompileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CompileError::InvalidName);
        }
        let metrics = self.metrics()?;

        let mut table = vec![self.notdef()];
        for (ch, glyph) in glyphs.iter() {
            if !glyph.has_outline() {
                tracing::debug!("Compiler: skipping empty glyph {:?}", ch);
                continue;
            }
            table.push(GlyphOutline {
                codepoint: Some(ch),
                name: glyph_name(ch),
                outline: self.font_outline(&glyph.paths),
                advance_width: to_font_units(self.advance_width(glyph) * self.scale()),
            });
        }

        let bytes = self.assembler.assemble(name, &metrics, &table)?;
        tracing::info!(
            "Compiled {:?}: {} glyphs, {} bytes",
            name,
            table.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Advance width of a glyph in editor units
    ///
    /// An explicit width wins; otherwise the right edge of the drawn outline
    /// plus letter spacing and the side margin, but never below the minimum.
    pub fn advance_width(&self, glyph: &Glyph) -> f64 {
        if let Some(width) = glyph.advance_width {
            return width;
        }
        if !glyph.has_outline() {
            return self.font.min_advance_width;
        }
        let rightmost = glyph.to_bezpath().bounding_box().x1;
        (rightmost + self.font.letter_spacing + self.font.advance_margin)
            .max(self.font.min_advance_width)
    }

    fn metrics(&self) -> Result<FontMetrics, CompileError> {
        let font = &self.font;
        if !(16..=16384).contains(&font.units_per_em) {
            return Err(CompileError::InvalidMetrics(format!(
                "units per em {} outside 16..=16384",
                font.units_per_em
            )));
        }
        if font.ascender <= font.descender {
            return Err(CompileError::InvalidMetrics(format!(
                "ascender {} must be above descender {}",
                font.ascender, font.descender
            )));
        }
        if self.canvas.height <= 0.0 {
            return Err(CompileError::InvalidMetrics("canvas height must be positive".into()));
        }
        Ok(FontMetrics {
            units_per_em: font.units_per_em,
            ascender: font.ascender,
            descender: font.descender,
        })
    }

    /// Font units per editor unit
    fn scale(&self) -> f64 {
        f64::from(self.font.units_per_em) / self.canvas.height
    }

    /// Editor to font space: baseline to zero, y up, one em per canvas height
    fn to_font_space(&self) -> Affine {
        let scale = self.scale();
        Affine::new([scale, 0.0, 0.0, -scale, 0.0, self.canvas.baseline * scale])
    }

    /// Concatenate the paths of a glyph into one font-space outline
    ///
    /// Every contour is closed and oriented so that nesting depth decides
    /// filled versus hole under the nonzero rule.
    fn font_outline(&self, paths: &[Path]) -> BezPath {
        let paths: Vec<&Path> = paths.iter().filter(|p| !p.is_degenerate()).collect();
        let rings: Vec<sampling::Ring> = paths
            .iter()
            .map(|p| sample_path(&closed(p), settings::sampling::SAMPLES_PER_SEGMENT))
            .collect();

        let mut outline = BezPath::new();
        for (i, path) in paths.iter().enumerate() {
            let depth = rings
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && sampling::ring_contains(other, rings[i][0]))
                .count();
            // Positive editor-space area is clockwise on screen, which is
            // the winding TrueType expects for filled contours.
            let clockwise = sampling::signed_area(&rings[i]) > 0.0;
            let mut contour = closed(path);
            if clockwise != (depth % 2 == 0) {
                reverse(&mut contour);
            }
            append_contour(&mut outline, &contour);
        }
        outline.apply_affine(self.to_font_space());
        outline
    }

    /// The `.notdef` box with its counter
    fn notdef(&self) -> GlyphOutline {
        let em = f64::from(self.font.units_per_em) / 1000.0;
        let outer = Rect::new(50.0, 0.0, 450.0, 700.0).scale_from_origin(em);
        let inner = outer.inset(-50.0 * em);
        let mut outline = BezPath::new();
        // Outer clockwise, inner counter-clockwise (y up).
        outline.move_to((outer.x0, outer.y0));
        outline.line_to((outer.x0, outer.y1));
        outline.line_to((outer.x1, outer.y1));
        outline.line_to((outer.x1, outer.y0));
        outline.close_path();
        outline.move_to((inner.x0, inner.y0));
        outline.line_to((inner.x1, inner.y0));
        outline.line_to((inner.x1, inner.y1));
        outline.line_to((inner.x0, inner.y1));
        outline.close_path();
        GlyphOutline {
            codepoint: None,
            name: ".notdef".to_string(),
            outline,
            advance_width: to_font_units(settings::metrics::NOTDEF_ADVANCE_WIDTH * em),
        }
    }
}

/// Production glyph name for a character
pub fn glyph_name(ch: char) -> String {
    match ch {
        ' ' => "space".to_string(),
        c if c.is_ascii_alphanumeric() => c.to_string(),
        c => format!("uni{:04X}", u32::from(c)),
    }
}

fn to_font_units(value: f64) -> u16 {
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

fn closed(path: &Path) -> Path {
    let mut path = path.clone();
    path.closed = true;
    path
}

/// Reverse the direction of a contour, swapping each node's handles
fn reverse(path: &mut Path) {
    path.nodes.reverse();
    for node in &mut path.nodes {
        std::mem::swap(&mut node.handle_in, &mut node.handle_out);
    }
}

/// Append a closed contour: lines where both handles are retracted, cubics
/// elsewhere, and no explicit closing line
fn append_contour(outline: &mut BezPath, path: &Path) {
    let Some(first) = path.nodes.first() else {
        return;
    };
    outline.move_to(first.anchor);
    let count = path.nodes.len();
    for (i, segment) in path.segments().enumerate() {
        let is_closing = i + 1 == count;
        if segment.is_straight() {
            if !is_closing {
                outline.line_to(segment.end);
            }
        } else {
            outline.curve_to(segment.control_out, segment.control_in, segment.end);
        }
    }
    outline.close_path();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::FontOutlineSource;
    use crate::model::{Node, NodeKind};
    use kurbo::{PathEl, Point};

    fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
        Path::polygon([
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
    }

    fn compiler_with_spacing(spacing: f64) -> FontCompiler {
        let mut config = EditorConfig::default();
        config.font.letter_spacing = spacing;
        FontCompiler::new(&config)
    }

    #[test]
    fn advance_width_from_rightmost_point() {
        let compiler = compiler_with_spacing(40.0);
        let glyph = Glyph::new(vec![rect_path(100.0, 300.0, 620.0, 800.0)]);
        assert_eq!(compiler.advance_width(&glyph), 710.0);
    }

    #[test]
    fn advance_width_ignores_handles_past_the_curve() {
        let compiler = compiler_with_spacing(0.0);
        let top = Node::new(
            Point::new(400.0, 100.0),
            Point::new(400.0, 100.0),
            Point::new(600.0, 100.0),
            NodeKind::Cusp,
        );
        let bottom = Node::new(
            Point::new(400.0, 500.0),
            Point::new(600.0, 500.0),
            Point::new(400.0, 500.0),
            NodeKind::Cusp,
        );
        let glyph = Glyph::new(vec![Path::new(vec![top, bottom], true)]);
        // The bulge peaks at x = 550 while its handles reach 600.
        assert!((compiler.advance_width(&glyph) - 600.0).abs() < 1e-6);
    }

    #[test]
    fn advance_width_has_a_floor_and_respects_explicit_values() {
        let compiler = compiler_with_spacing(0.0);
        let narrow = Glyph::new(vec![rect_path(0.0, 700.0, 20.0, 800.0)]);
        assert_eq!(compiler.advance_width(&narrow), 200.0);

        let mut explicit = narrow.clone();
        explicit.advance_width = Some(333.0);
        assert_eq!(compiler.advance_width(&explicit), 333.0);
    }

    #[test]
    fn empty_name_is_rejected() {
        let compiler = compiler_with_spacing(0.0);
        assert!(matches!(
            compiler.compile(&GlyphMap::new(), "  "),
            Err(CompileError::InvalidName)
        ));
    }

    #[test]
    fn inverted_metrics_are_rejected() {
        let mut config = EditorConfig::default();
        config.font.ascender = -300;
        let compiler = FontCompiler::new(&config);
        assert!(matches!(
            compiler.compile(&GlyphMap::new(), "Test"),
            Err(CompileError::InvalidMetrics(_))
        ));
    }

    #[test]
    fn outlines_flip_to_font_space() {
        let compiler = compiler_with_spacing(0.0);
        let outline = compiler.font_outline(&[rect_path(100.0, 300.0, 400.0, 800.0)]);
        let bounds = outline.bounding_box();
        assert_eq!(bounds, Rect::new(100.0, 0.0, 400.0, 500.0));
        let lines = outline
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::LineTo(_)))
            .count();
        assert_eq!(lines, 3);
    }

    #[test]
    fn nested_contours_wind_in_opposite_directions() {
        let compiler = compiler_with_spacing(0.0);
        // Both drawn the same way round; the inner one must be flipped.
        let outline = compiler.font_outline(&[
            rect_path(100.0, 100.0, 500.0, 500.0),
            rect_path(200.0, 200.0, 400.0, 400.0),
        ]);
        let areas: Vec<f64> = outline
            .elements()
            .split(|el| matches!(el, PathEl::ClosePath))
            .filter(|els| !els.is_empty())
            .map(|els| {
                let ring: Vec<Point> = els.iter().filter_map(|el| el.end_point()).collect();
                sampling::signed_area(&ring)
            })
            .collect();
        assert_eq!(areas.len(), 2);
        assert!(areas[0] < 0.0, "outer contour should be clockwise");
        assert!(areas[1] > 0.0, "inner contour should be counter-clockwise");
    }

    #[test]
    fn compiled_font_reads_back() {
        let mut glyphs = GlyphMap::new();
        glyphs.insert('A', Glyph::new(vec![rect_path(300.0, 300.0, 600.0, 500.0)]));
        glyphs.insert('B', Glyph::default());

        let compiler = compiler_with_spacing(0.0);
        let bytes = compiler.compile(&glyphs, "Glyphforge Test").unwrap();

        let face = ttf_parser::Face::parse(&bytes, 0).unwrap();
        assert_eq!(face.units_per_em(), 1000);
        assert_eq!(face.number_of_glyphs(), 2);
        let a = face.glyph_index('A').unwrap();
        assert_eq!(a.0, 1);
        assert_eq!(face.glyph_hor_advance(a), Some(650));
        assert!(face.glyph_index('B').is_none());

        let source = FontOutlineSource::from_bytes(&bytes).unwrap();
        let report = source.import_glyphs(['A', 'B'], &CanvasConfig::default());
        assert_eq!(report.missing, vec!['B']);
        let imported = report.glyphs.get('A').unwrap();
        assert_eq!(imported.paths.len(), 1);
        assert_eq!(imported.paths[0].len(), 4);
        let ys: Vec<f64> = imported.paths[0].nodes.iter().map(|n| n.anchor.y).collect();
        assert!(ys.iter().all(|y| (*y - 300.0).abs() < 1e-9 || (*y - 500.0).abs() < 1e-9));
    }
}
