// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod mouse;
pub mod selection;
pub mod session;
pub mod undo;
pub mod viewport;

pub use mouse::{Drag, Modifiers, Mouse, MouseButton, MouseDelegate, MouseEvent};
pub use selection::{NodeRef, Selection};
pub use session::{EditSession, HitTarget};
pub use undo::UndoState;
pub use viewport::ViewPort;
