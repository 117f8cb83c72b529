// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Path-description strings (SVG path syntax)

use super::{ImportError, OutlineCommand, paths_from_commands};
use crate::model::Path;
use kurbo::{BezPath, PathEl};

/// Convert a path-description string into editor paths
///
/// Coordinates are taken as editor coordinates: nothing is flipped, scaled
/// or centered. Relative and shorthand commands are resolved by the parser.
pub fn paths_from_path_data(data: &str) -> Result<Vec<Path>, ImportError> {
    let bez = BezPath::from_svg(data).map_err(|err| ImportError::PathData(err.to_string()))?;
    let commands: Vec<OutlineCommand> = bez
        .elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) => OutlineCommand::MoveTo(p),
            PathEl::LineTo(p) => OutlineCommand::LineTo(p),
            PathEl::QuadTo(q, p) => OutlineCommand::QuadTo(q, p),
            PathEl::CurveTo(c1, c2, p) => OutlineCommand::CurveTo(c1, c2, p),
            PathEl::ClosePath => OutlineCommand::Close,
        })
        .collect();
    Ok(paths_from_commands(&commands))
}
