// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Selection set for tracking which paths and nodes are selected.
//!
//! `Selection` wraps two `Arc<BTreeSet>`s so it can be cheaply cloned.
//! Mutations go through `Arc::make_mut` (copy-on-write). The `BTreeSet`
//! gives deterministic iteration order, which matters for multi-node
//! operations like dragging. Selecting a node always selects its owning
//! path too. Selections are transient and never persisted.

use crate::model::EntityId;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A node addressed by its owning path and its index in that path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef {
    pub path: EntityId,
    pub index: usize,
}

impl NodeRef {
    pub fn new(path: EntityId, index: usize) -> Self {
        Self { path, index }
    }
}

/// Selected paths and nodes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    paths: Arc<BTreeSet<EntityId>>,
    nodes: Arc<BTreeSet<NodeRef>>,
}

impl Selection {
    /// Create a new empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.nodes.is_empty()
    }

    /// Whether any individual nodes are selected
    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_path(&self, id: &EntityId) -> bool {
        self.paths.contains(id)
    }

    pub fn contains_node(&self, node: &NodeRef) -> bool {
        self.nodes.contains(node)
    }

    /// Iterate over selected path ids
    pub fn paths(&self) -> impl Iterator<Item = &EntityId> {
        self.paths.iter()
    }

    /// Iterate over selected nodes
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRef> {
        self.nodes.iter()
    }

    /// Selected node indices within one path
    pub fn nodes_in(&self, path: EntityId) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .filter(move |node| node.path == path)
            .map(|node| node.index)
    }

    /// Add a whole path to the selection
    pub fn insert_path(&mut self, id: EntityId) {
        Arc::make_mut(&mut self.paths).insert(id);
    }

    /// Add a node, and with it its owning path
    pub fn insert_node(&mut self, node: NodeRef) {
        Arc::make_mut(&mut self.paths).insert(node.path);
        Arc::make_mut(&mut self.nodes).insert(node);
    }

    /// Remove a path together with all of its selected nodes
    pub fn remove_path(&mut self, id: &EntityId) {
        Arc::make_mut(&mut self.paths).remove(id);
        Arc::make_mut(&mut self.nodes).retain(|node| node.path != *id);
    }

    /// Deselect individual nodes, keeping path selection
    pub fn clear_nodes(&mut self) {
        if !self.nodes.is_empty() {
            self.nodes = Arc::new(BTreeSet::new());
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Selection of exactly one path
    pub fn single_path(id: EntityId) -> Self {
        let mut selection = Self::new();
        selection.insert_path(id);
        selection
    }

    /// Merge another selection into this one
    pub fn extend(&mut self, other: &Selection) {
        for id in other.paths() {
            self.insert_path(*id);
        }
        for node in other.nodes() {
            self.insert_node(*node);
        }
    }
}
