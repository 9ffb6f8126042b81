//! Placement and readouts for the floating decoration editor.

#[cfg(test)]
#[path = "editor_layout_test.rs"]
mod editor_layout_test;

use canvas::doc::Decoration;

/// Offset from the decoration's top-left to the editor card.
pub const EDITOR_OFFSET_PX: f64 = 20.0;
/// Smallest left/top coordinate of the editor card.
pub const EDITOR_MIN_PX: f64 = 20.0;
/// Largest left/top coordinate of the editor card.
pub const EDITOR_MAX_PX: f64 = 400.0;

/// `(left, top)` of the editor card, in surface pixels, for `decoration`.
pub fn editor_anchor(decoration: &Decoration) -> (f64, f64) {
    let place = |v: f64| (v + EDITOR_OFFSET_PX).clamp(EDITOR_MIN_PX, EDITOR_MAX_PX);
    (place(decoration.position.x), place(decoration.position.y))
}

/// Whole degrees, e.g. `"45°"`.
#[allow(clippy::cast_possible_truncation)]
pub fn format_rotation(deg: f64) -> String {
    format!("{}°", deg.round() as i64)
}

/// One decimal, e.g. `"1.2x"`.
pub fn format_scale(scale: f64) -> String {
    format!("{scale:.1}x")
}

/// CSS transform previewing the decoration in the editor.
pub fn preview_transform(decoration: &Decoration) -> String {
    format!("rotate({}deg) scale({})", decoration.rotation, decoration.scale)
}
