// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyph data model: nodes, paths, glyphs and the glyph map

pub mod entity_id;
pub mod glyph;
pub mod node;
pub mod path;

pub use entity_id::EntityId;
pub use glyph::{Glyph, GlyphMap};
pub use node::{HandleSide, Node, NodeKind};
pub use path::{Path, Segment};
