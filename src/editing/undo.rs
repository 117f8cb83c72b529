// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Linear snapshot history.
//!
//! The stack holds every recorded state; `live_index` points at the one the
//! editor currently shows. Recording a new group drops everything after the
//! cursor. The stack is bounded; the oldest snapshot goes first.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct UndoState<T> {
    stack: VecDeque<T>,
    live_index: usize,
    max_depth: usize,
}

impl<T: Clone> UndoState<T> {
    /// Start a history whose only entry is `initial`
    pub fn new(initial: T, max_depth: usize) -> Self {
        let mut stack = VecDeque::new();
        stack.push_back(initial);
        Self {
            stack,
            live_index: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Record a new state after the live one, discarding any redo states
    pub fn add_undo_group(&mut self, state: T) {
        self.stack.truncate(self.live_index + 1);
        self.stack.push_back(state);
        if self.stack.len() > self.max_depth {
            self.stack.pop_front();
        }
        self.live_index = self.stack.len() - 1;
    }

    /// Step back and return the state to restore
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.live_index -= 1;
        self.stack.get(self.live_index).cloned()
    }

    /// Step forward and return the state to restore
    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        self.live_index += 1;
        self.stack.get(self.live_index).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.live_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.live_index + 1 < self.stack.len()
    }

    /// Drop all history and start over from `initial`
    pub fn reset(&mut self, initial: T) {
        self.stack.clear();
        self.stack.push_back(initial);
        self.live_index = 0;
    }

    /// Number of recorded states, including the initial one
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
