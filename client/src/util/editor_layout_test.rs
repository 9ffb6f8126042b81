use canvas::doc::{Content, DecorationStore};
use canvas::surface::Point;

use super::*;

fn decoration_at(x: f64, y: f64) -> Decoration {
    let mut store = DecorationStore::new();
    let id = store.add(Content::emoji("🎁"), Point::new(x, y));
    store.get(&id).cloned().unwrap()
}

// =============================================================
// editor_anchor
// =============================================================

#[test]
fn anchor_offsets_from_position() {
    assert_eq!(editor_anchor(&decoration_at(100.0, 150.0)), (120.0, 170.0));
}

#[test]
fn anchor_clamps_low_and_high() {
    assert_eq!(editor_anchor(&decoration_at(-50.0, 0.0)), (EDITOR_MIN_PX, EDITOR_MIN_PX));
    assert_eq!(editor_anchor(&decoration_at(700.0, 650.0)), (EDITOR_MAX_PX, EDITOR_MAX_PX));
}

// =============================================================
// Readouts
// =============================================================

#[test]
fn rotation_readout_rounds_to_whole_degrees() {
    assert_eq!(format_rotation(0.0), "0°");
    assert_eq!(format_rotation(44.6), "45°");
    assert_eq!(format_rotation(359.4), "359°");
}

#[test]
fn scale_readout_has_one_decimal() {
    assert_eq!(format_scale(1.0), "1.0x");
    assert_eq!(format_scale(0.3), "0.3x");
    assert_eq!(format_scale(1.44), "1.4x");
}

#[test]
fn preview_transform_uses_rotation_and_scale() {
    let d = decoration_at(0.0, 0.0);
    assert_eq!(preview_transform(&d), "rotate(0deg) scale(1)");
}
