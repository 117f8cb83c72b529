// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Flattening paths into polygon rings.
//!
//! The boolean engine operates on polygons, and bounding boxes and hit tests
//! are cheaper on polylines, so both go through [`sample_path`]. A ring is an
//! ordered list of points whose last point repeats the first.

use crate::model::Path;
use kurbo::{BezPath, ParamCurve, Point, Rect, Shape};

/// A closed polyline approximation of a contour
pub type Ring = Vec<Point>;

/// Flatten a path into a closed ring.
///
/// Straight segments contribute only their end anchor; curved segments are
/// evaluated at `samples_per_segment` uniform parameter steps, skipping
/// t = 0 which would duplicate the previous segment's end. Paths with fewer
/// than two nodes produce an empty ring.
pub fn sample_path(path: &Path, samples_per_segment: usize) -> Ring {
    if path.is_degenerate() {
        return Vec::new();
    }

    let steps = samples_per_segment.max(1);
    let mut ring = vec![path.nodes[0].anchor];

    for segment in path.segments() {
        if segment.is_straight() {
            ring.push(segment.end);
            continue;
        }
        let cubic = segment.to_cubic();
        for step in 1..=steps {
            let t = step as f64 / steps as f64;
            ring.push(cubic.eval(t));
        }
    }

    // Open paths end away from the start; close the ring explicitly.
    if ring.last() != ring.first() {
        ring.push(ring[0]);
    }
    ring
}

/// Sample every path of a set, dropping degenerate ones
pub fn sample_paths<'a>(
    paths: impl IntoIterator<Item = &'a Path>,
    samples_per_segment: usize,
) -> Vec<Ring> {
    paths
        .into_iter()
        .map(|path| sample_path(path, samples_per_segment))
        .filter(|ring| !ring.is_empty())
        .collect()
}

/// Bounding rectangle of a set of rings
pub fn rings_bounds(rings: &[Ring]) -> Option<Rect> {
    rings
        .iter()
        .filter(|ring| !ring.is_empty())
        .map(|ring| ring_to_bezpath(ring).bounding_box())
        .reduce(|acc, rect| acc.union(rect))
}

/// Bounding rectangle of a set of paths, measured on their sampled outline
pub fn paths_bounds<'a>(
    paths: impl IntoIterator<Item = &'a Path>,
    samples_per_segment: usize,
) -> Option<Rect> {
    rings_bounds(&sample_paths(paths, samples_per_segment))
}

/// The ring as a closed polyline `BezPath`
pub fn ring_to_bezpath(ring: &[Point]) -> BezPath {
    let mut bez = BezPath::new();
    let Some((first, rest)) = ring.split_first() else {
        return bez;
    };
    bez.move_to(*first);
    for pt in rest {
        bez.line_to(*pt);
    }
    bez.close_path();
    bez
}

/// Even-odd point-in-ring test
pub fn ring_contains(ring: &[Point], point: Point) -> bool {
    ring.len() >= 3 && ring_to_bezpath(ring).winding(point) % 2 != 0
}

/// Even-odd coverage of a point across several rings
pub fn rings_cover(rings: &[Ring], point: Point) -> bool {
    rings
        .iter()
        .filter(|ring| ring_contains(ring, point))
        .count()
        % 2
        == 1
}

/// Signed area of a ring (positive for counter-clockwise in y-up space)
pub fn signed_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    ring_to_bezpath(ring).area()
}
