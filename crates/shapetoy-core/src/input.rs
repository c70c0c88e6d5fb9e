//! Input state management for mouse and keyboard events.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Key name that switches selection into additive (toggle) mode.
pub const ADDITIVE_KEY: &str = "Shift";

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    /// Whether clicks should toggle membership instead of replacing the selection.
    pub fn additive(&self) -> bool {
        self.shift
    }
}

/// Pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Button pressed over the canvas.
    Down { position: Point },
    /// Pointer moved, anywhere in the viewport.
    Move { position: Point },
    /// Button released, anywhere in the viewport.
    Up { position: Point },
    /// Press and release on the canvas.
    Click { position: Point },
    /// Pointer left the canvas element.
    Leave,
}

/// Keyboard event type, carrying the DOM-style key name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// On-screen offset of the canvas element, used to convert client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasOrigin {
    pub left: f64,
    pub top: f64,
}

impl CanvasOrigin {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Convert a client (viewport) position to canvas-local coordinates.
    pub fn to_local(&self, client: Point) -> Point {
        client - Vec2::new(self.left, self.top)
    }
}

/// Tracks keyboard modifier state across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current modifier keys state.
    pub modifiers: Modifiers,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key event, keeping the modifier flags in sync.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        let (key, down) = match event {
            KeyEvent::Pressed(key) => (key, true),
            KeyEvent::Released(key) => (key, false),
        };
        if key == ADDITIVE_KEY {
            self.modifiers.shift = down;
        }
    }
}
