// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer state machine.
//!
//! The host feeds raw down/move/up events into a [`Mouse`], which works out
//! clicks and drags and calls into a [`MouseDelegate`] (the active tool).
//! Positions are in screen space; delegates convert through the viewport.

use kurbo::Point;

/// Which button a pointer event refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

/// Keyboard modifiers held during a pointer or key event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A pointer event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub pos: Point,
    pub button: MouseButton,
    pub mods: Modifiers,
    /// Click count: 2 for a double click
    pub count: u8,
}

impl MouseEvent {
    /// A single left-button event without modifiers
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            button: MouseButton::Left,
            mods: Modifiers::NONE,
            count: 1,
        }
    }

    pub fn with_mods(mut self, mods: Modifiers) -> Self {
        self.mods = mods;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_count(mut self, count: u8) -> Self {
        self.count = count;
        self
    }
}

/// Positions of an ongoing drag, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub start: Point,
    pub prev: Point,
    pub current: Point,
}

impl Drag {
    fn new(start: Point, prev: Point, current: Point) -> Self {
        Self {
            start,
            prev,
            current,
        }
    }
}

/// Receiver of interpreted pointer gestures
///
/// Every method has an empty default so tools only implement what they use.
#[allow(unused_variables)]
pub trait MouseDelegate {
    type Data;

    fn mouse_moved(&mut self, event: MouseEvent, data: &mut Self::Data) {}
    fn left_down(&mut self, event: MouseEvent, data: &mut Self::Data) {}
    fn left_up(&mut self, event: MouseEvent, data: &mut Self::Data) {}
    fn left_click(&mut self, event: MouseEvent, data: &mut Self::Data) {}
    fn left_drag_began(&mut self, event: MouseEvent, drag: Drag, data: &mut Self::Data) {}
    fn left_drag_changed(&mut self, event: MouseEvent, drag: Drag, data: &mut Self::Data) {}
    fn left_drag_ended(&mut self, event: MouseEvent, drag: Drag, data: &mut Self::Data) {}
    fn cancel(&mut self, data: &mut Self::Data) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MouseState {
    Up,
    Down(MouseEvent),
    Drag {
        start: MouseEvent,
        current: MouseEvent,
    },
}

/// Turns raw left-button events into clicks and drags
#[derive(Debug, Clone)]
pub struct Mouse {
    state: MouseState,
    drag_threshold: f64,
    last_event: Option<MouseEvent>,
}

impl Default for Mouse {
    fn default() -> Self {
        Self::new(crate::settings::interaction::DRAG_THRESHOLD)
    }
}

impl Mouse {
    /// Create a state machine that starts a drag after `drag_threshold`
    /// screen pixels of travel
    pub fn new(drag_threshold: f64) -> Self {
        Self {
            state: MouseState::Up,
            drag_threshold,
            last_event: None,
        }
    }

    /// Whether a button is held
    pub fn is_down(&self) -> bool {
        !matches!(self.state, MouseState::Up)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, MouseState::Drag { .. })
    }

    /// The most recent event seen, if any
    pub fn last_event(&self) -> Option<MouseEvent> {
        self.last_event
    }

    pub fn mouse_down<T>(
        &mut self,
        event: MouseEvent,
        delegate: &mut dyn MouseDelegate<Data = T>,
        data: &mut T,
    ) {
        self.last_event = Some(event);
        if event.button != MouseButton::Left {
            return;
        }
        if self.is_down() {
            // A second press without a release: finish the first gesture.
            self.mouse_up(event, delegate, data);
        }
        self.state = MouseState::Down(event);
        delegate.left_down(event, data);
    }

    pub fn mouse_moved<T>(
        &mut self,
        event: MouseEvent,
        delegate: &mut dyn MouseDelegate<Data = T>,
        data: &mut T,
    ) {
        self.last_event = Some(event);
        match self.state {
            MouseState::Up => delegate.mouse_moved(event, data),
            MouseState::Down(start) => {
                if (event.pos - start.pos).hypot() < self.drag_threshold {
                    return;
                }
                let drag = Drag::new(start.pos, start.pos, event.pos);
                self.state = MouseState::Drag {
                    start,
                    current: event,
                };
                delegate.left_drag_began(event, drag, data);
            }
            MouseState::Drag { start, current } => {
                let drag = Drag::new(start.pos, current.pos, event.pos);
                self.state = MouseState::Drag {
                    start,
                    current: event,
                };
                delegate.left_drag_changed(event, drag, data);
            }
        }
    }

    pub fn mouse_up<T>(
        &mut self,
        event: MouseEvent,
        delegate: &mut dyn MouseDelegate<Data = T>,
        data: &mut T,
    ) {
        self.last_event = Some(event);
        if event.button != MouseButton::Left {
            return;
        }
        match std::mem::replace(&mut self.state, MouseState::Up) {
            MouseState::Up => {}
            MouseState::Down(_) => {
                delegate.left_click(event, data);
                delegate.left_up(event, data);
            }
            MouseState::Drag { start, current } => {
                let drag = Drag::new(start.pos, current.pos, event.pos);
                delegate.left_drag_ended(event, drag, data);
                delegate.left_up(event, data);
            }
        }
    }

    /// Finish a held gesture at the last known position.
    ///
    /// Used when the pointer leaves the canvas or the button is released
    /// outside it, so a drag can never stay stuck.
    pub fn release<T>(&mut self, delegate: &mut dyn MouseDelegate<Data = T>, data: &mut T) {
        if let Some(event) = self.last_event.filter(|_| self.is_down()) {
            self.mouse_up(event.with_button(MouseButton::Left), delegate, data);
        }
    }

    /// Abandon any gesture without committing it
    pub fn cancel<T>(&mut self, delegate: &mut dyn MouseDelegate<Data = T>, data: &mut T) {
        self.state = MouseState::Up;
        delegate.cancel(data);
    }
}
