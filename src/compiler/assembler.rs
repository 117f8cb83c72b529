// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Binary font assembly

use super::{CompileError, FontMetrics, GlyphOutline};
use kurbo::{BezPath, CubicBez, PathEl, Rect};
use write_fonts::FontBuilder;
use write_fonts::tables::cmap::Cmap;
use write_fonts::tables::glyf::{GlyfLocaBuilder, SimpleGlyph};
use write_fonts::tables::head::Head;
use write_fonts::tables::hhea::Hhea;
use write_fonts::tables::hmtx::{Hmtx, LongMetric};
use write_fonts::tables::maxp::Maxp;
use write_fonts::tables::name::{Name, NameRecord};
use write_fonts::tables::os2::Os2;
use write_fonts::types::{FWord, GlyphId, NameId, UfWord};

/// Turns a compiled glyph table into font bytes
pub trait FontAssembler {
    fn assemble(
        &self,
        family_name: &str,
        metrics: &FontMetrics,
        glyphs: &[GlyphOutline],
    ) -> Result<Vec<u8>, CompileError>;
}

/// TrueType (`glyf`) assembler
///
/// Cubic segments are approximated by quadratic splines within `tolerance`
/// font units.
#[derive(Debug, Clone, Copy)]
pub struct TrueTypeAssembler {
    tolerance: f64,
}

impl TrueTypeAssembler {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.01),
        }
    }
}

impl Default for TrueTypeAssembler {
    fn default() -> Self {
        Self::new(crate::settings::metrics::QUADRATIC_TOLERANCE)
    }
}

fn assembler_error(what: &str, err: impl std::fmt::Debug) -> CompileError {
    CompileError::Assembler(format!("{what}: {err:?}"))
}

/// Per-font extremes gathered while building `glyf`
#[derive(Debug, Default)]
struct GlyphStats {
    bounds: Option<Rect>,
    max_points: u16,
    max_contours: u16,
    advance_max: u16,
    min_lsb: i16,
    min_rsb: i16,
    max_extent: i16,
}

impl GlyphStats {
    fn add(&mut self, outline: &kurbo_11::BezPath, bounds: Rect, advance: u16) {
        let contours = outline
            .elements()
            .iter()
            .filter(|el| matches!(el, kurbo_11::PathEl::MoveTo(_)))
            .count();
        let points: usize = outline
            .elements()
            .iter()
            .map(|el| match el {
                kurbo_11::PathEl::QuadTo(..) => 2,
                kurbo_11::PathEl::ClosePath => 0,
                _ => 1,
            })
            .sum();
        self.max_points = self.max_points.max(saturating_u16(points));
        self.max_contours = self.max_contours.max(saturating_u16(contours));
        self.advance_max = self.advance_max.max(advance);
        if contours == 0 {
            return;
        }
        let lsb = round_i16(bounds.x0);
        let rsb = round_i16(f64::from(advance) - bounds.x1);
        let extent = round_i16(bounds.x1);
        self.bounds = Some(self.bounds.map_or(bounds, |b| b.union(bounds)));
        self.min_lsb = self.min_lsb.min(lsb);
        self.min_rsb = self.min_rsb.min(rsb);
        self.max_extent = self.max_extent.max(extent);
    }
}

impl FontAssembler for TrueTypeAssembler {
    fn assemble(
        &self,
        family_name: &str,
        metrics: &FontMetrics,
        glyphs: &[GlyphOutline],
    ) -> Result<Vec<u8>, CompileError> {
        let num_glyphs = u16::try_from(glyphs.len())
            .map_err(|_| CompileError::Assembler(format!("too many glyphs: {}", glyphs.len())))?;

        let mut glyf = GlyfLocaBuilder::new();
        let mut stats = GlyphStats::default();
        let mut h_metrics = Vec::with_capacity(glyphs.len());
        for glyph in glyphs {
            let bounds = glyph.bounds();
            let outline = to_quadratic(&glyph.outline, self.tolerance);
            let simple = SimpleGlyph::from_bezpath(&outline)
                .map_err(|err| assembler_error(&format!("glyph {}", glyph.name), err))?;
            glyf.add_glyph(&simple)
                .map_err(|err| assembler_error(&format!("glyph {}", glyph.name), err))?;
            stats.add(&outline, bounds, glyph.advance_width);
            h_metrics.push(LongMetric::new(glyph.advance_width, round_i16(bounds.x0)));
        }
        let (glyf, loca, loca_format) = glyf.build();
        let bounds = stats.bounds.unwrap_or(Rect::ZERO);

        let head = Head {
            units_per_em: metrics.units_per_em,
            x_min: round_i16(bounds.x0),
            y_min: round_i16(bounds.y0),
            x_max: round_i16(bounds.x1),
            y_max: round_i16(bounds.y1),
            lowest_rec_ppem: 8,
            index_to_loc_format: loca_format as i16,
            ..Default::default()
        };

        let hhea = Hhea {
            ascender: FWord::new(metrics.ascender),
            descender: FWord::new(metrics.descender),
            line_gap: FWord::new(0),
            advance_width_max: UfWord::new(stats.advance_max),
            min_left_side_bearing: FWord::new(stats.min_lsb),
            min_right_side_bearing: FWord::new(stats.min_rsb),
            x_max_extent: FWord::new(stats.max_extent),
            caret_slope_rise: 1,
            caret_slope_run: 0,
            number_of_h_metrics: num_glyphs,
            ..Default::default()
        };

        let maxp = Maxp {
            num_glyphs,
            max_points: Some(stats.max_points),
            max_contours: Some(stats.max_contours),
            max_composite_points: Some(0),
            max_composite_contours: Some(0),
            max_zones: Some(2),
            max_twilight_points: Some(0),
            max_storage: Some(0),
            max_function_defs: Some(0),
            max_instruction_defs: Some(0),
            max_stack_elements: Some(0),
            max_size_of_instructions: Some(0),
            max_component_elements: Some(0),
            max_component_depth: Some(0),
        };

        let hmtx = Hmtx::new(h_metrics, Vec::new());

        let mappings = glyphs.iter().enumerate().filter_map(|(gid, glyph)| {
            let ch = glyph.codepoint?;
            Some((ch, GlyphId::new(gid as u32)))
        });
        let cmap = Cmap::from_mappings(mappings).map_err(|err| assembler_error("cmap", err))?;

        let codepoints: Vec<u32> = glyphs
            .iter()
            .filter_map(|g| g.codepoint.map(u32::from))
            .collect();
        let first_char = codepoints.iter().min().copied().unwrap_or(0);
        let last_char = codepoints.iter().max().copied().unwrap_or(0);
        let average_advance = glyphs
            .iter()
            .map(|g| f64::from(g.advance_width))
            .sum::<f64>()
            / f64::from(num_glyphs.max(1));

        let os2 = Os2 {
            x_avg_char_width: round_i16(average_advance),
            us_weight_class: 400,
            us_width_class: 5,
            s_typo_ascender: metrics.ascender,
            s_typo_descender: metrics.descender,
            s_typo_line_gap: 0,
            us_win_ascent: u16::try_from(metrics.ascender.max(0)).unwrap_or(0),
            us_win_descent: u16::try_from(-i32::from(metrics.descender.min(0))).unwrap_or(u16::MAX),
            us_first_char_index: saturating_u16(first_char as usize),
            us_last_char_index: saturating_u16(last_char as usize),
            ..Default::default()
        };

        let name = name_table(family_name);

        let mut builder = FontBuilder::new();
        builder
            .add_table(&head)
            .and_then(|b| b.add_table(&hhea))
            .and_then(|b| b.add_table(&maxp))
            .and_then(|b| b.add_table(&os2))
            .and_then(|b| b.add_table(&hmtx))
            .and_then(|b| b.add_table(&cmap))
            .and_then(|b| b.add_table(&loca))
            .and_then(|b| b.add_table(&glyf))
            .and_then(|b| b.add_table(&name))
            .map_err(|err| assembler_error("table", err))?;
        Ok(builder.build())
    }
}

/// Windows-platform English name records for a regular style
fn name_table(family: &str) -> Name {
    let postscript: String = family.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    let records = [
        (NameId::FAMILY_NAME, family.to_string()),
        (NameId::SUBFAMILY_NAME, "Regular".to_string()),
        (NameId::UNIQUE_ID, format!("{postscript}-Regular")),
        (NameId::FULL_NAME, family.to_string()),
        (NameId::VERSION_STRING, "Version 1.000".to_string()),
        (NameId::POSTSCRIPT_NAME, format!("{postscript}-Regular")),
    ];
    Name::new(
        records
            .into_iter()
            .map(|(id, text)| NameRecord::new(3, 1, 0x409, id, text.into()))
            .collect(),
    )
}

/// Convert an outline to quadratic-only form for `glyf`
fn to_quadratic(path: &BezPath, tolerance: f64) -> kurbo_11::BezPath {
    let pt = |p: kurbo::Point| kurbo_11::Point::new(p.x, p.y);
    let mut out = kurbo_11::BezPath::new();
    let mut current = kurbo::Point::ZERO;
    let mut start = kurbo::Point::ZERO;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                out.move_to(pt(p));
                start = p;
                current = p;
            }
            PathEl::LineTo(p) => {
                out.line_to(pt(p));
                current = p;
            }
            PathEl::QuadTo(q, p) => {
                out.quad_to(pt(q), pt(p));
                current = p;
            }
            PathEl::CurveTo(c1, c2, p) => {
                for (_, _, quad) in CubicBez::new(current, c1, c2, p).to_quads(tolerance) {
                    out.quad_to(pt(quad.p1), pt(quad.p2));
                }
                current = p;
            }
            PathEl::ClosePath => {
                out.close_path();
                current = start;
            }
        }
    }
    out
}

fn round_i16(value: f64) -> i16 {
    value.round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

fn saturating_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
