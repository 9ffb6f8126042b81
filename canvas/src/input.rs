//! Input model: pointer kinds, buttons, keys, and the gesture state machine.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. A gesture starts as `Pressed` and becomes `Dragging` only once
//! the pointer travels past the drag threshold; releasing while still
//! `Pressed` resolves the gesture as a click. `UiState` holds the rest of the
//! transient interaction state (editor target, hover) so the document store
//! stays pure data.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::DecorationId;
use crate::surface::Point;

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Cursor the host should show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grab,
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Transient interaction state that is not part of any decoration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Decoration whose editor is open, if any.
    pub editing: Option<DecorationId>,
    /// Decoration under the idle pointer, used for cursor feedback.
    pub hovered: Option<DecorationId>,
}

/// Gesture state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No decoration engaged.
    #[default]
    Idle,
    /// Pointer is down on a decoration but has not moved past the threshold.
    Pressed {
        /// Engaged decoration.
        id: DecorationId,
        /// Device that started the gesture.
        pointer: PointerKind,
        /// Surface position of the press.
        start: Point,
        /// Pointer minus decoration position at press time.
        offset: Point,
    },
    /// The decoration follows the pointer.
    Dragging {
        /// Engaged decoration.
        id: DecorationId,
        /// Device that started the gesture.
        pointer: PointerKind,
        /// Pointer minus decoration position at press time.
        offset: Point,
        /// Surface position of the most recent move.
        last: Point,
    },
}

impl InputState {
    /// Decoration engaged by the current gesture.
    #[must_use]
    pub fn engaged(&self) -> Option<DecorationId> {
        match self {
            Self::Idle => None,
            Self::Pressed { id, .. } | Self::Dragging { id, .. } => Some(*id),
        }
    }
}
