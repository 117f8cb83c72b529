// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Outline import: font glyphs and path-description strings to editor paths.
//!
//! Both sources are reduced to a list of [`OutlineCommand`]s, which are then
//! turned into closed [`Path`]s of nodes. Font outlines are also flipped,
//! scaled to the canvas em and centered on the canvas midline.

mod font;
mod path_data;

pub use font::{FontOutlineSource, ImportReport};
pub use path_data::paths_from_path_data;

use crate::config::CanvasConfig;
use crate::model::node::{classify_kind, points_coincide};
use crate::model::{Node, NodeKind, Path};
use kurbo::{Point, Vec2};
use thiserror::Error;

/// Errors that stop an import as a whole
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to parse font: {0}")]
    Font(#[from] ttf_parser::FaceParsingError),

    #[error("Font reports zero units per em")]
    InvalidUnitsPerEm,

    #[error("Invalid path data: {0}")]
    PathData(String),
}

/// One drawing command of an outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
    Close,
}

/// Build one closed path per contour, in the commands' own coordinates
///
/// Contours with fewer than two nodes are dropped.
pub fn paths_from_commands(commands: &[OutlineCommand]) -> Vec<Path> {
    let mut builder = ContourBuilder::default();
    for command in commands {
        builder.push(*command);
    }
    builder.finish()
}

/// Build paths from font-space commands and place them on the canvas
///
/// Font space has its baseline at 0 and grows up; the editor has its
/// baseline at `canvas.baseline` and grows down. Outlines are scaled so one
/// em spans the canvas height, then shifted so their horizontal extent is
/// centered on the canvas.
pub fn paths_from_font_outline(
    commands: &[OutlineCommand],
    units_per_em: u16,
    canvas: &CanvasConfig,
) -> Vec<Path> {
    let scale = canvas.height / f64::from(units_per_em.max(1));
    let mut paths = paths_from_commands(commands);
    for path in &mut paths {
        for node in &mut path.nodes {
            map_node(node, |p| Point::new(p.x * scale, canvas.baseline - p.y * scale));
        }
    }

    let Some((min_x, max_x)) = horizontal_extent(&paths) else {
        return paths;
    };
    let shift = Vec2::new(canvas.width / 2.0 - (min_x + max_x) / 2.0, 0.0);
    for path in &mut paths {
        path.translate(shift);
    }
    paths
}

fn horizontal_extent(paths: &[Path]) -> Option<(f64, f64)> {
    paths
        .iter()
        .flat_map(|path| path.control_points())
        .fold(None, |extent, p| match extent {
            None => Some((p.x, p.x)),
            Some((min, max)) => Some((f64::min(min, p.x), f64::max(max, p.x))),
        })
}

fn map_node(node: &mut Node, f: impl Fn(Point) -> Point) {
    node.anchor = f(node.anchor);
    node.handle_in = f(node.handle_in);
    node.handle_out = f(node.handle_out);
}

/// Incremental contour state while walking commands
#[derive(Debug, Default)]
struct ContourBuilder {
    current: Vec<Node>,
    paths: Vec<Path>,
}

impl ContourBuilder {
    fn push(&mut self, command: OutlineCommand) {
        match command {
            OutlineCommand::MoveTo(p) => {
                self.end_contour();
                self.current.push(Node::corner(p));
            }
            OutlineCommand::LineTo(p) => self.current.push(Node::corner(p)),
            OutlineCommand::QuadTo(q, p) => {
                let start = self.last_anchor();
                let c1 = start + (q - start) * (2.0 / 3.0);
                let c2 = p + (q - p) * (2.0 / 3.0);
                self.cubic_to(c1, c2, p);
            }
            OutlineCommand::CurveTo(c1, c2, p) => self.cubic_to(c1, c2, p),
            OutlineCommand::Close => {
                self.absorb_closing_node();
                self.end_contour();
            }
        }
    }

    fn last_anchor(&self) -> Point {
        self.current.last().map_or(Point::ZERO, |node| node.anchor)
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        match self.current.last_mut() {
            Some(last) => last.handle_out = c1,
            // A curve without a start point begins at the origin.
            None => self.current.push(Node::new(Point::ZERO, Point::ZERO, c1, NodeKind::Cusp)),
        }
        self.current.push(Node::new(p, c2, p, NodeKind::Cusp));
    }

    /// A closing segment that lands on the start collapses into the start
    fn absorb_closing_node(&mut self) {
        if self.current.len() < 2 {
            return;
        }
        let first = self.current[0].anchor;
        let closes_on_start = self
            .current
            .last()
            .is_some_and(|last| points_coincide(last.anchor, first));
        if closes_on_start {
            if let Some(last) = self.current.pop() {
                self.current[0].handle_in = last.handle_in;
            }
        }
    }

    fn end_contour(&mut self) {
        let mut nodes = std::mem::take(&mut self.current);
        if nodes.len() < 2 {
            if !nodes.is_empty() {
                tracing::debug!("Import: dropped single-node contour");
            }
            return;
        }
        for node in &mut nodes {
            node.kind = classify_kind(node.handle_in, node.anchor, node.handle_out);
        }
        self.paths.push(Path::new(nodes, true));
    }

    fn finish(mut self) -> Vec<Path> {
        self.end_contour();
        self.paths
    }
}
