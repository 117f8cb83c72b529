// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Unique identifiers for paths on the canvas.
//!
//! Each `EntityId` is a monotonically increasing `u64` generated from a global
//! atomic counter. Ids key the `Selection` sets and survive undo snapshots, so
//! a restored path keeps the id it had when the snapshot was taken. They are
//! never persisted: a glyph map loaded from disk gets fresh ids.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

static ENTITY_COUNTER: AtomicU64 = AtomicU64::new(1);

impl EntityId {
    /// Create a new unique entity ID
    pub fn next() -> Self {
        Self(ENTITY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::next()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
