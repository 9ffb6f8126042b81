//! Canvas input mapping and pointer helper utilities.

#[cfg(test)]
#[path = "canvas_input_test.rs"]
mod canvas_input_test;

use canvas::input::{Button as CanvasButton, PointerKind};
use canvas::surface::{Extent, Point as CanvasPoint};

/// A pointer kind that differs from the last accepted one is ignored for
/// this long, so compatibility mouse events after a touch are dropped.
pub const INPUT_KIND_COOLDOWN_MS: f64 = 2000.0;

/// Tracks the most recent pointer kind to filter emulated input.
#[derive(Clone, Debug, Default)]
pub struct PointerPolicy {
    last_kind: Option<PointerKind>,
    last_ts: f64,
}

impl PointerPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept input of `kind` at `now_ms` unless another kind was seen within
    /// the cooldown. Accepted input becomes the new reference.
    pub fn accept_kind(&mut self, kind: PointerKind, now_ms: f64) -> bool {
        if let Some(last) = self.last_kind {
            if last != kind && (now_ms - self.last_ts) < INPUT_KIND_COOLDOWN_MS {
                return false;
            }
        }
        self.last_kind = Some(kind);
        self.last_ts = now_ms;
        true
    }

    /// Whether a compatibility mouse event (`dblclick`, `contextmenu`) at
    /// `now_ms` is real rather than synthesized from a recent touch.
    pub fn accepts_compat(&self, now_ms: f64) -> bool {
        self.last_kind != Some(PointerKind::Touch) || (now_ms - self.last_ts) >= INPUT_KIND_COOLDOWN_MS
    }
}

/// Canvas backing-store size in device pixels for a logical `extent`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn backing_size(extent: Extent, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let px = |v: f64| (v * dpr).round().max(1.0) as u32;
    (px(extent.width), px(extent.height))
}

pub fn map_button(button: i16) -> CanvasButton {
    match button {
        1 => CanvasButton::Middle,
        2 => CanvasButton::Secondary,
        _ => CanvasButton::Primary,
    }
}

/// Map `PointerEvent.pointerType`; unknown types are treated as mouse.
pub fn map_pointer_kind(pointer_type: &str) -> PointerKind {
    match pointer_type {
        "touch" => PointerKind::Touch,
        "pen" => PointerKind::Pen,
        _ => PointerKind::Mouse,
    }
}

pub fn should_prevent_default_key(key: &str) -> bool {
    matches!(key, "Delete" | "Backspace" | "Escape")
}

/// Document events (move, end, cancel) that follow a gesture of `kind`.
pub fn capture_events(kind: PointerKind) -> [&'static str; 3] {
    match kind {
        PointerKind::Touch => ["touchmove", "touchend", "touchcancel"],
        PointerKind::Mouse | PointerKind::Pen => ["pointermove", "pointerup", "pointercancel"],
    }
}

#[cfg(feature = "csr")]
pub fn mouse_point(ev: &web_sys::MouseEvent) -> CanvasPoint {
    CanvasPoint::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// Position of touch `id` among `(identifier, position)` pairs.
pub fn pick_touch(touches: impl IntoIterator<Item = (i32, CanvasPoint)>, id: i32) -> Option<CanvasPoint> {
    touches.into_iter().find(|(ident, _)| *ident == id).map(|(_, point)| point)
}

#[cfg(feature = "csr")]
fn changed_touches(ev: &web_sys::TouchEvent) -> impl Iterator<Item = (i32, CanvasPoint)> {
    let list = ev.changed_touches();
    (0..list.length()).filter_map(move |i| list.get(i)).map(|touch| {
        (touch.identifier(), CanvasPoint::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
    })
}

/// Identifier and client position of the first touch this event changed.
#[cfg(feature = "csr")]
pub fn first_touch(ev: &web_sys::TouchEvent) -> Option<(i32, CanvasPoint)> {
    changed_touches(ev).next()
}

/// Client position of touch `id` when this event changed it. Other fingers
/// yield `None`.
#[cfg(feature = "csr")]
pub fn tracked_touch_point(ev: &web_sys::TouchEvent, id: i32) -> Option<CanvasPoint> {
    pick_touch(changed_touches(ev), id)
}
