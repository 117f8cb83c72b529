// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Boolean composition of paths (weld and punch).
//!
//! Paths are flattened to rings, combined by a [`PolygonClipper`], and the
//! resulting rings are rebuilt as straight-segment paths. Curvature is not
//! preserved: the clipper only understands polygons.

use crate::model::{Node, Path};
use crate::sampling::{self, Ring};
use kurbo::{BezPath, PathEl, Point};
use linesweeper::{BinaryOp, FillRule};

/// Polygon boolean capability
///
/// Rings are closed polylines (last point repeats the first). An empty
/// result is a valid outcome, not an error.
pub trait PolygonClipper {
    fn union(&self, subject: &[Ring], clip: &[Ring]) -> Vec<Ring>;
    fn difference(&self, subject: &[Ring], clip: &[Ring]) -> Vec<Ring>;
}

/// Even-odd polygon clipper backed by `linesweeper`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinesweeperClipper;

impl LinesweeperClipper {
    fn run(&self, subject: &[Ring], clip: &[Ring], op: BinaryOp) -> Vec<Ring> {
        let subject = rings_to_bezpath(subject);
        let clip = rings_to_bezpath(clip);
        match linesweeper::binary_op(&subject, &clip, FillRule::EvenOdd, op) {
            Ok(contours) => contours
                .contours()
                .map(|contour| bezpath_to_ring(&contour.path))
                .filter(|ring| !ring.is_empty())
                .collect(),
            Err(err) => {
                tracing::warn!("Boolean operation failed, treating result as empty: {err:?}");
                Vec::new()
            }
        }
    }
}

impl PolygonClipper for LinesweeperClipper {
    fn union(&self, subject: &[Ring], clip: &[Ring]) -> Vec<Ring> {
        self.run(subject, clip, BinaryOp::Union)
    }

    fn difference(&self, subject: &[Ring], clip: &[Ring]) -> Vec<Ring> {
        self.run(subject, clip, BinaryOp::Difference)
    }
}

/// Union and difference over paths
#[derive(Debug, Clone)]
pub struct BooleanEngine<C = LinesweeperClipper> {
    clipper: C,
    samples_per_segment: usize,
}

impl BooleanEngine<LinesweeperClipper> {
    pub fn new(samples_per_segment: usize) -> Self {
        Self::with_clipper(LinesweeperClipper, samples_per_segment)
    }
}

impl<C: PolygonClipper> BooleanEngine<C> {
    pub fn with_clipper(clipper: C, samples_per_segment: usize) -> Self {
        Self {
            clipper,
            samples_per_segment,
        }
    }

    /// Merge paths into their union, folding left across the inputs
    ///
    /// A hole travels with the shape enclosing it, so a punched shape is a
    /// single even-odd operand and its counter stays open.
    pub fn union(&self, paths: &[Path]) -> Vec<Path> {
        let mut operands = self.operands(paths).into_iter();
        let Some(first) = operands.next() else {
            return Vec::new();
        };
        let merged = operands.fold(first, |acc, operand| self.clipper.union(&acc, &operand));
        rebuild_paths(&merged)
    }

    /// Sample paths into union operands: one per filled path, with each
    /// hole attached to the smallest filled path around it
    fn operands(&self, paths: &[Path]) -> Vec<Vec<Ring>> {
        let (holes, shapes): (Vec<_>, Vec<_>) = paths
            .iter()
            .map(|path| (path.is_hole, sampling::sample_path(path, self.samples_per_segment)))
            .filter(|(_, ring)| !ring.is_empty())
            .partition(|(is_hole, _)| *is_hole);

        let mut operands: Vec<Vec<Ring>> = shapes.into_iter().map(|(_, ring)| vec![ring]).collect();
        let shape_count = operands.len();
        for (_, hole) in holes {
            let container = (0..shape_count)
                .filter(|&i| sampling::ring_contains(&operands[i][0], hole[0]))
                .min_by(|&a, &b| {
                    let area = |i: usize| sampling::signed_area(&operands[i][0]).abs();
                    area(a).total_cmp(&area(b))
                });
            match container {
                Some(i) => operands[i].push(hole),
                // An orphaned hole has nothing to cut and is filled as drawn.
                None => operands.push(vec![hole]),
            }
        }
        operands
    }

    /// Subtract `cutter` from `target`; may yield zero or more pieces
    pub fn difference(&self, target: &Path, cutter: &Path) -> Vec<Path> {
        let subject = sampling::sample_paths([target], self.samples_per_segment);
        if subject.is_empty() {
            return Vec::new();
        }
        let clip = sampling::sample_paths([cutter], self.samples_per_segment);
        if clip.is_empty() {
            return rebuild_paths(&subject);
        }
        rebuild_paths(&self.clipper.difference(&subject, &clip))
    }
}

/// Rebuild one ring as a closed path of cusp nodes.
///
/// The repeated closing point and consecutive duplicates are dropped; node
/// order follows the ring so winding is preserved.
pub fn ring_to_path(ring: &[Point]) -> Option<Path> {
    let points = distinct_points(ring);
    if points.len() < 2 {
        return None;
    }
    Some(Path::new(points.into_iter().map(Node::corner).collect(), true))
}

/// Rebuild clipper output as paths, flagging rings nested an odd number of
/// times as holes
pub fn rebuild_paths(rings: &[Ring]) -> Vec<Path> {
    let rings: Vec<&Ring> = rings
        .iter()
        .filter(|ring| distinct_points(ring).len() >= 3)
        .collect();

    rings
        .iter()
        .enumerate()
        .filter_map(|(i, ring)| {
            let mut path = ring_to_path(ring)?;
            let start = ring[0];
            let depth = rings
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && sampling::ring_contains(other, start))
                .count();
            path.is_hole = depth % 2 == 1;
            Some(path)
        })
        .collect()
}

fn distinct_points(ring: &[Point]) -> Vec<Point> {
    let mut points: Vec<Point> = Vec::with_capacity(ring.len());
    for &pt in ring {
        if points
            .last()
            .is_none_or(|last| !crate::model::node::points_coincide(*last, pt))
        {
            points.push(pt);
        }
    }
    if points.len() > 1
        && crate::model::node::points_coincide(points[0], points[points.len() - 1])
    {
        points.pop();
    }
    points
}

fn rings_to_bezpath(rings: &[Ring]) -> BezPath {
    let mut bez = BezPath::new();
    for ring in rings {
        let contour = sampling::ring_to_bezpath(&distinct_points(ring));
        bez.extend(contour.elements().iter().copied());
    }
    bez
}

fn bezpath_to_ring(path: &BezPath) -> Ring {
    let mut ring: Ring = Vec::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => ring.push(p),
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => ring.push(p),
            PathEl::ClosePath => {}
        }
    }
    if let Some(&first) = ring.first()
        && ring.last() != Some(&first)
    {
        ring.push(first);
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{rings_cover, sample_path, sample_paths};

    fn square(min_x: f64, min_y: f64, size: f64) -> Path {
        Path::polygon([
            Point::new(min_x, min_y),
            Point::new(min_x + size, min_y),
            Point::new(min_x + size, min_y + size),
            Point::new(min_x, min_y + size),
        ])
    }

    fn area_of(paths: &[Path]) -> f64 {
        paths
            .iter()
            .map(|p| {
                let ring = sample_path(p, 30);
                let area = sampling::signed_area(&ring).abs();
                if p.is_hole { -area } else { area }
            })
            .sum()
    }

    #[test]
    fn ring_round_trip_preserves_anchors_and_winding() {
        let path = Path::polygon([
            Point::new(0.0, 0.0),
            Point::new(40.0, 5.0),
            Point::new(35.0, 60.0),
            Point::new(-3.0, 20.0),
        ]);
        let ring = sample_path(&path, 30);
        let rebuilt = ring_to_path(&ring).unwrap();

        assert!(rebuilt.closed);
        assert_eq!(rebuilt.nodes.len(), path.nodes.len());
        for (a, b) in rebuilt.nodes.iter().zip(&path.nodes) {
            assert!((a.anchor - b.anchor).hypot() < 1e-9);
        }
        let before = sampling::signed_area(&ring);
        let after = sampling::signed_area(&sample_path(&rebuilt, 30));
        assert_eq!(before.signum(), after.signum());
    }

    #[test]
    fn union_of_overlapping_squares_is_one_path() {
        let engine = BooleanEngine::new(30);
        let merged = engine.union(&[square(0.0, 0.0, 100.0), square(50.0, 50.0, 100.0)]);
        assert_eq!(merged.len(), 1);
        assert!((area_of(&merged) - 17_500.0).abs() < 1e-6);
        assert!(merged[0].nodes.iter().all(|n| n.kind == crate::model::NodeKind::Cusp));
    }

    #[test]
    fn union_of_disjoint_squares_keeps_both() {
        let engine = BooleanEngine::new(30);
        let merged = engine.union(&[square(0.0, 0.0, 10.0), square(50.0, 0.0, 10.0)]);
        assert_eq!(merged.len(), 2);
        assert!((area_of(&merged) - 200.0).abs() < 1e-6);
    }

    #[test]
    fn union_is_idempotent() {
        let engine = BooleanEngine::new(30);
        let once = engine.union(&[square(0.0, 0.0, 100.0), square(50.0, 50.0, 100.0)]);
        let twice = engine.union(&once);
        assert_eq!(twice.len(), once.len());
        assert!((area_of(&twice) - area_of(&once)).abs() < 1e-6);
        let rings = sample_paths(&once, 30);
        let rings_twice = sample_paths(&twice, 30);
        for point in [Point::new(10.0, 10.0), Point::new(120.0, 120.0), Point::new(120.0, 10.0)] {
            assert_eq!(rings_cover(&rings, point), rings_cover(&rings_twice, point));
        }
    }

    fn frame_bars() -> Vec<Path> {
        let bar = |x0: f64, y0: f64, x1: f64, y1: f64| {
            Path::polygon([
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ])
        };
        vec![
            bar(0.0, 0.0, 300.0, 50.0),
            bar(0.0, 250.0, 300.0, 300.0),
            bar(0.0, 0.0, 50.0, 300.0),
            bar(250.0, 0.0, 300.0, 300.0),
        ]
    }

    fn hole_flags(paths: &[Path]) -> Vec<bool> {
        let mut flags: Vec<bool> = paths.iter().map(|p| p.is_hole).collect();
        flags.sort();
        flags
    }

    #[test]
    fn union_of_a_frame_keeps_its_counter_open() {
        let engine = BooleanEngine::new(30);
        let once = engine.union(&frame_bars());
        let twice = engine.union(&once);
        let center = Point::new(150.0, 150.0);
        let rim = Point::new(25.0, 150.0);

        assert_eq!(hole_flags(&once), vec![false, true]);
        assert!(!rings_cover(&sample_paths(&once, 30), center));
        assert!(rings_cover(&sample_paths(&once, 30), rim));

        assert_eq!(twice.len(), once.len());
        assert_eq!(hole_flags(&twice), hole_flags(&once));
        assert!(!rings_cover(&sample_paths(&twice, 30), center));
        assert!(rings_cover(&sample_paths(&twice, 30), rim));
        assert!((area_of(&twice) - 50_000.0).abs() < 1e-6);
    }

    #[test]
    fn union_with_a_punched_shape_fills_only_the_overlap() {
        let engine = BooleanEngine::new(30);
        let frame = engine.union(&frame_bars());
        let mut inputs = frame.clone();
        inputs.push(square(100.0, 100.0, 50.0));
        let merged = engine.union(&inputs);
        let rings = sample_paths(&merged, 30);

        assert!(rings_cover(&rings, Point::new(125.0, 125.0)));
        assert!(!rings_cover(&rings, Point::new(200.0, 200.0)));
        assert!((area_of(&merged) - 52_500.0).abs() < 1e-6);
    }

    #[test]
    fn difference_punches_a_hole() {
        let engine = BooleanEngine::new(30);
        let pieces = engine.difference(&square(0.0, 0.0, 100.0), &square(25.0, 25.0, 50.0));
        let rings = sample_paths(&pieces, 30);

        assert!(rings_cover(&rings, Point::new(10.0, 10.0)));
        assert!(rings_cover(&rings, Point::new(90.0, 50.0)));
        assert!(!rings_cover(&rings, Point::new(50.0, 50.0)));
        assert!(!rings_cover(&rings, Point::new(30.0, 70.0)));
        assert!(pieces.iter().any(|p| p.is_hole));
        assert!((area_of(&pieces) - 7_500.0).abs() < 1e-6);
    }

    #[test]
    fn difference_can_split_a_target() {
        let engine = BooleanEngine::new(30);
        let bar = Path::polygon([
            Point::new(0.0, 0.0),
            Point::new(300.0, 0.0),
            Point::new(300.0, 50.0),
            Point::new(0.0, 50.0),
        ]);
        let cutter = Path::polygon([
            Point::new(100.0, -50.0),
            Point::new(200.0, -50.0),
            Point::new(200.0, 100.0),
            Point::new(100.0, 100.0),
        ]);
        let pieces = engine.difference(&bar, &cutter);
        assert_eq!(pieces.len(), 2);
    }

    #[test]
    fn difference_can_remove_a_target() {
        let engine = BooleanEngine::new(30);
        let pieces = engine.difference(&square(10.0, 10.0, 10.0), &square(0.0, 0.0, 100.0));
        assert!(pieces.is_empty());
    }

    struct NothingClipper;

    impl PolygonClipper for NothingClipper {
        fn union(&self, _: &[Ring], _: &[Ring]) -> Vec<Ring> {
            Vec::new()
        }
        fn difference(&self, _: &[Ring], _: &[Ring]) -> Vec<Ring> {
            Vec::new()
        }
    }

    #[test]
    fn empty_clip_result_is_not_an_error() {
        let engine = BooleanEngine::with_clipper(NothingClipper, 30);
        assert!(engine.union(&[square(0.0, 0.0, 1.0), square(0.5, 0.5, 1.0)]).is_empty());
    }
}
