#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{QUICK_GROW_FACTOR, QUICK_SHRINK_FACTOR, SCALE_MAX, SCALE_MIN};
use crate::doc::TextStyle;
use crate::tree::{LightPalette, ORNAMENTS};

// =============================================================
// Helpers
// =============================================================

/// Engine with a single emoji whose 40px box spans (100,100)..(140,140).
fn engine_with_emoji() -> (Engine, DecorationId) {
    let mut engine = Engine::new();
    let id = engine.add_decoration(Content::emoji("🎁"), Some(Point::new(100.0, 100.0)));
    (engine, id)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn down(engine: &mut Engine, x: f64, y: f64) -> Vec<Action> {
    engine.on_pointer_down(pt(x, y), Button::Primary, PointerKind::Mouse)
}

fn position(engine: &Engine, id: &DecorationId) -> Point {
    engine.decoration(id).unwrap().position
}

fn count_edit_requests(actions: &[Action]) -> usize {
    actions.iter().filter(|a| matches!(a, Action::EditRequested { .. })).count()
}

fn empty_point() -> Point {
    pt(5.0, 5.0)
}

// =============================================================
// add_decoration
// =============================================================

#[test]
fn add_without_position_centers_box_on_surface() {
    let mut engine = Engine::new();
    let id = engine.add_decoration(Content::emoji("⛄"), None);
    let dec = engine.decoration(&id).unwrap();
    assert_eq!(dec.center(), engine.config.extent.center());
    assert_eq!(dec.position, pt(364.0, 330.0));
}

#[test]
fn add_with_position_uses_it() {
    let (engine, id) = engine_with_emoji();
    assert_eq!(position(&engine, &id), pt(100.0, 100.0));
    assert_eq!(engine.decorations().len(), 1);
}

// =============================================================
// Click vs drag
// =============================================================

#[test]
fn press_and_release_without_moving_requests_edit_once() {
    let (mut engine, id) = engine_with_emoji();
    let pressed = down(&mut engine, 120.0, 120.0);
    assert_eq!(pressed, vec![Action::CaptureStarted, Action::SetCursor(Cursor::Grabbing)]);
    assert!(matches!(engine.input, InputState::Pressed { .. }));

    let up = engine.on_pointer_up(pt(120.0, 120.0));
    assert_eq!(count_edit_requests(&up), 1);
    assert!(up.contains(&Action::EditRequested { id }));
    assert!(up.contains(&Action::CaptureEnded));
    assert_eq!(engine.input, InputState::Idle);
    assert_eq!(position(&engine, &id), pt(100.0, 100.0));
}

#[test]
fn moves_within_threshold_do_not_mutate() {
    let (mut engine, id) = engine_with_emoji();
    down(&mut engine, 120.0, 120.0);
    let mut all = Vec::new();
    all.extend(engine.on_pointer_move(pt(122.0, 121.0)));
    all.extend(engine.on_pointer_move(pt(123.0, 124.0)));
    all.extend(engine.on_pointer_up(pt(123.0, 124.0)));
    assert_eq!(position(&engine, &id), pt(100.0, 100.0));
    assert!(!all.iter().any(|a| matches!(a, Action::DecorationMoved { .. })));
    assert_eq!(count_edit_requests(&all), 1);
}

#[test]
fn threshold_is_strict() {
    let (mut engine, id) = engine_with_emoji();
    down(&mut engine, 120.0, 120.0);
    assert!(engine.on_pointer_move(pt(125.0, 120.0)).is_empty());
    assert!(matches!(engine.input, InputState::Pressed { .. }));
    assert_eq!(position(&engine, &id), pt(100.0, 100.0));
}

#[test]
fn drag_past_threshold_moves_on_every_move() {
    let (mut engine, id) = engine_with_emoji();
    down(&mut engine, 110.0, 115.0);

    let first = engine.on_pointer_move(pt(120.0, 115.0));
    assert!(first.contains(&Action::DecorationMoved { id }));
    assert!(matches!(engine.input, InputState::Dragging { .. }));
    // Offset (10, 15) is preserved.
    assert_eq!(position(&engine, &id), pt(110.0, 100.0));

    engine.on_pointer_move(pt(200.0, 215.0));
    assert_eq!(position(&engine, &id), pt(190.0, 200.0));

    // Moves back inside the original threshold still follow the pointer.
    engine.on_pointer_move(pt(111.0, 115.0));
    assert_eq!(position(&engine, &id), pt(101.0, 100.0));

    let up = engine.on_pointer_up(pt(111.0, 115.0));
    assert_eq!(count_edit_requests(&up), 0);
    assert!(up.contains(&Action::CaptureEnded));
    assert_eq!(engine.input, InputState::Idle);
    assert_eq!(position(&engine, &id), pt(101.0, 100.0));
}

#[test]
fn drag_can_leave_the_surface() {
    let (mut engine, id) = engine_with_emoji();
    down(&mut engine, 120.0, 120.0);
    engine.on_pointer_move(pt(-50.0, 900.0));
    assert_eq!(position(&engine, &id), pt(-70.0, 880.0));
}

#[test]
fn mouse_drag_does_not_prevent_scroll() {
    let (mut engine, _) = engine_with_emoji();
    down(&mut engine, 120.0, 120.0);
    let actions = engine.on_pointer_move(pt(140.0, 140.0));
    assert!(!actions.contains(&Action::PreventScroll));
}

#[test]
fn touch_drag_prevents_scroll() {
    let (mut engine, _) = engine_with_emoji();
    engine.on_pointer_down(pt(120.0, 120.0), Button::Primary, PointerKind::Touch);
    assert!(engine.on_pointer_move(pt(121.0, 121.0)).is_empty());
    let actions = engine.on_pointer_move(pt(140.0, 140.0));
    assert!(actions.contains(&Action::PreventScroll));
}

#[test]
fn capture_start_and_end_are_paired() {
    let (mut engine, _) = engine_with_emoji();
    let mut all = down(&mut engine, 120.0, 120.0);
    all.extend(engine.on_pointer_move(pt(150.0, 150.0)));
    all.extend(engine.on_pointer_up(pt(150.0, 150.0)));
    let started = all.iter().filter(|a| **a == Action::CaptureStarted).count();
    let ended = all.iter().filter(|a| **a == Action::CaptureEnded).count();
    assert_eq!((started, ended), (1, 1));
}

#[test]
fn pointer_down_on_topmost_decoration() {
    let (mut engine, below) = engine_with_emoji();
    let above = engine.add_decoration(Content::emoji("🍬"), Some(pt(110.0, 110.0)));
    down(&mut engine, 125.0, 125.0);
    assert_eq!(engine.input.engaged(), Some(above));
    engine.on_pointer_up(pt(125.0, 125.0));
    down(&mut engine, 102.0, 102.0);
    assert_eq!(engine.input.engaged(), Some(below));
}

#[test]
fn secondary_button_does_not_start_gesture() {
    let (mut engine, _) = engine_with_emoji();
    let actions = engine.on_pointer_down(pt(120.0, 120.0), Button::Secondary, PointerKind::Mouse);
    assert!(actions.is_empty());
    assert_eq!(engine.input, InputState::Idle);
}

#[test]
fn second_pointer_down_during_gesture_is_ignored() {
    let (mut engine, id) = engine_with_emoji();
    let other = engine.add_decoration(Content::emoji("🔔"), Some(pt(300.0, 300.0)));
    down(&mut engine, 120.0, 120.0);
    assert!(down(&mut engine, 320.0, 320.0).is_empty());
    assert_eq!(engine.input.engaged(), Some(id));
    assert_ne!(engine.input.engaged(), Some(other));
}

#[test]
fn up_while_idle_is_noop() {
    let (mut engine, _) = engine_with_emoji();
    assert!(engine.on_pointer_up(pt(1.0, 1.0)).is_empty());
}

// =============================================================
// Cancel and removal mid-gesture
// =============================================================

#[test]
fn cancel_while_pressed_ends_without_click() {
    let (mut engine, _) = engine_with_emoji();
    down(&mut engine, 120.0, 120.0);
    let actions = engine.on_pointer_cancel();
    assert!(actions.contains(&Action::CaptureEnded));
    assert_eq!(count_edit_requests(&actions), 0);
    assert_eq!(engine.input, InputState::Idle);
}

#[test]
fn cancel_while_dragging_keeps_last_position() {
    let (mut engine, id) = engine_with_emoji();
    down(&mut engine, 120.0, 120.0);
    engine.on_pointer_move(pt(160.0, 160.0));
    engine.on_pointer_cancel();
    assert_eq!(position(&engine, &id), pt(140.0, 140.0));
    assert_eq!(engine.input, InputState::Idle);
}

#[test]
fn cancel_while_idle_is_noop() {
    let mut engine = Engine::new();
    assert!(engine.on_pointer_cancel().is_empty());
}

#[test]
fn removed_mid_press_returns_to_idle_on_move() {
    let (mut engine, id) = engine_with_emoji();
    down(&mut engine, 120.0, 120.0);
    engine.remove(&id);
    let actions = engine.on_pointer_move(pt(200.0, 200.0));
    assert!(actions.contains(&Action::CaptureEnded));
    assert!(!actions.iter().any(|a| matches!(a, Action::DecorationMoved { .. })));
    assert_eq!(engine.input, InputState::Idle);
    assert!(engine.doc.is_empty());
}

#[test]
fn removed_mid_drag_returns_to_idle_on_move() {
    let (mut engine, id) = engine_with_emoji();
    down(&mut engine, 120.0, 120.0);
    engine.on_pointer_move(pt(150.0, 150.0));
    engine.remove(&id);
    let actions = engine.on_pointer_move(pt(200.0, 200.0));
    assert_eq!(actions[0], Action::CaptureEnded);
    assert_eq!(engine.input, InputState::Idle);
}

#[test]
fn removed_mid_press_up_requests_nothing() {
    let (mut engine, id) = engine_with_emoji();
    down(&mut engine, 120.0, 120.0);
    engine.remove(&id);
    let actions = engine.on_pointer_up(pt(120.0, 120.0));
    assert!(actions.contains(&Action::CaptureEnded));
    assert_eq!(count_edit_requests(&actions), 0);
}

// =============================================================
// Empty surface, ornaments, hover
// =============================================================

#[test]
fn pointer_down_on_empty_closes_editor() {
    let (mut engine, id) = engine_with_emoji();
    assert!(engine.open_editor(&id));
    let p = empty_point();
    let actions = down(&mut engine, p.x, p.y);
    assert!(actions.contains(&Action::EditorClosed));
    assert!(engine.ui.editing.is_none());
    assert_eq!(engine.input, InputState::Idle);
}

#[test]
fn pointer_down_on_ornament_toggles_glow() {
    let mut engine = Engine::new();
    let c = ORNAMENTS[5].center(engine.config.extent);
    let actions = down(&mut engine, c.x, c.y);
    assert!(actions.contains(&Action::OrnamentToggled { index: 5, lit: true }));
    assert!(engine.scene.is_lit(5));
    let actions = down(&mut engine, c.x, c.y);
    assert!(actions.contains(&Action::OrnamentToggled { index: 5, lit: false }));
    assert!(!engine.scene.is_lit(5));
}

#[test]
fn hidden_lights_cannot_be_toggled() {
    let mut engine = Engine::new();
    engine.scene.show_lights = false;
    let c = ORNAMENTS[5].center(engine.config.extent);
    assert!(down(&mut engine, c.x, c.y).is_empty());
    assert!(engine.scene.lit.is_empty());
}

#[test]
fn decoration_over_ornament_wins() {
    let mut engine = Engine::new();
    let c = ORNAMENTS[5].center(engine.config.extent);
    let id = engine.add_decoration(Content::emoji("🎩"), Some(pt(c.x - 20.0, c.y - 20.0)));
    down(&mut engine, c.x, c.y);
    assert_eq!(engine.input.engaged(), Some(id));
    assert!(engine.scene.lit.is_empty());
}

#[test]
fn hover_sets_cursor_on_change_only() {
    let (mut engine, id) = engine_with_emoji();
    assert_eq!(engine.on_pointer_move(pt(120.0, 120.0)), vec![Action::SetCursor(Cursor::Grab)]);
    assert_eq!(engine.ui.hovered, Some(id));
    assert!(engine.on_pointer_move(pt(121.0, 120.0)).is_empty());
    assert_eq!(engine.on_pointer_move(pt(300.0, 20.0)), vec![Action::SetCursor(Cursor::Default)]);
    assert!(engine.ui.hovered.is_none());
}

// =============================================================
// Auxiliary gestures
// =============================================================

#[test]
fn wheel_down_shrinks_and_up_grows() {
    let (mut engine, id) = engine_with_emoji();
    let actions = engine.on_wheel(pt(120.0, 120.0), WheelDelta { dx: 0.0, dy: 100.0 });
    assert!(actions.contains(&Action::DecorationUpdated { id }));
    assert!((engine.decoration(&id).unwrap().scale - 0.9).abs() < 1e-9);
    engine.on_wheel(pt(120.0, 120.0), WheelDelta { dx: 0.0, dy: -3.0 });
    engine.on_wheel(pt(120.0, 120.0), WheelDelta { dx: 0.0, dy: -3.0 });
    assert!((engine.decoration(&id).unwrap().scale - 1.1).abs() < 1e-9);
}

#[test]
fn wheel_scale_is_clamped() {
    let (mut engine, id) = engine_with_emoji();
    for _ in 0..40 {
        engine.on_wheel(pt(120.0, 120.0), WheelDelta { dx: 0.0, dy: -1.0 });
    }
    assert_eq!(engine.decoration(&id).unwrap().scale, SCALE_MAX);
    for _ in 0..60 {
        // The scaled box keeps covering its center.
        engine.on_wheel(pt(120.0, 120.0), WheelDelta { dx: 0.0, dy: 1.0 });
    }
    assert_eq!(engine.decoration(&id).unwrap().scale, SCALE_MIN);
}

#[test]
fn wheel_off_decoration_or_horizontal_is_noop() {
    let (mut engine, id) = engine_with_emoji();
    assert!(engine.on_wheel(empty_point(), WheelDelta { dx: 0.0, dy: 1.0 }).is_empty());
    assert!(engine.on_wheel(pt(120.0, 120.0), WheelDelta { dx: 5.0, dy: 0.0 }).is_empty());
    assert_eq!(engine.decoration(&id).unwrap().scale, 1.0);
}

#[test]
fn double_click_rotates_by_step_modulo_full_turn() {
    let (mut engine, id) = engine_with_emoji();
    engine.on_double_click(pt(120.0, 120.0));
    assert_eq!(engine.decoration(&id).unwrap().rotation, 45.0);
    for _ in 0..7 {
        engine.on_double_click(pt(120.0, 120.0));
    }
    assert_eq!(engine.decoration(&id).unwrap().rotation, 0.0);
}

#[test]
fn double_click_on_empty_is_noop() {
    let (mut engine, id) = engine_with_emoji();
    assert!(engine.on_double_click(empty_point()).is_empty());
    assert_eq!(engine.decoration(&id).unwrap().rotation, 0.0);
}

#[test]
fn context_menu_removes_decoration_and_closes_editor() {
    let (mut engine, id) = engine_with_emoji();
    engine.open_editor(&id);
    let actions = engine.on_context_menu(pt(120.0, 120.0));
    assert!(actions.contains(&Action::DecorationRemoved { id }));
    assert!(actions.contains(&Action::EditorClosed));
    assert!(engine.doc.is_empty());
    assert!(engine.editing().is_none());
}

#[test]
fn context_menu_on_empty_is_noop() {
    let (mut engine, _) = engine_with_emoji();
    assert!(engine.on_context_menu(empty_point()).is_empty());
    assert_eq!(engine.doc.len(), 1);
}

#[test]
fn delete_key_removes_edited_decoration() {
    let (mut engine, id) = engine_with_emoji();
    assert!(engine.on_key_down(&Key("Delete".into())).is_empty());
    engine.open_editor(&id);
    let actions = engine.on_key_down(&Key("Backspace".into()));
    assert!(actions.contains(&Action::DecorationRemoved { id }));
    assert!(engine.doc.is_empty());
}

#[test]
fn escape_closes_editor() {
    let (mut engine, id) = engine_with_emoji();
    engine.open_editor(&id);
    assert_eq!(engine.on_key_down(&Key("Escape".into())), vec![Action::EditorClosed, Action::RenderNeeded]);
    assert!(engine.ui.editing.is_none());
    assert!(engine.on_key_down(&Key("Escape".into())).is_empty());
    assert!(engine.on_key_down(&Key("a".into())).is_empty());
}

// =============================================================
// Editor operations
// =============================================================

#[test]
fn open_editor_requires_existing_decoration() {
    let (mut engine, id) = engine_with_emoji();
    assert!(!engine.open_editor(&uuid::Uuid::new_v4()));
    assert!(engine.open_editor(&id));
    assert_eq!(engine.editing().map(|d| d.id), Some(id));
}

#[test]
fn set_rotation_normalizes() {
    let (mut engine, id) = engine_with_emoji();
    engine.set_rotation(&id, -30.0).unwrap();
    assert_eq!(engine.decoration(&id).unwrap().rotation, 330.0);
    engine.set_rotation(&id, 720.0).unwrap();
    assert_eq!(engine.decoration(&id).unwrap().rotation, 0.0);
}

#[test]
fn rotate_by_accumulates() {
    let (mut engine, id) = engine_with_emoji();
    engine.rotate_by(&id, 45.0).unwrap();
    engine.rotate_by(&id, 45.0).unwrap();
    engine.rotate_by(&id, -135.0).unwrap();
    assert_eq!(engine.decoration(&id).unwrap().rotation, 315.0);
}

#[test]
fn scale_operations_clamp() {
    let (mut engine, id) = engine_with_emoji();
    engine.set_scale(&id, 5.0).unwrap();
    assert_eq!(engine.decoration(&id).unwrap().scale, SCALE_MAX);
    engine.scale_times(&id, QUICK_SHRINK_FACTOR).unwrap();
    assert!((engine.decoration(&id).unwrap().scale - 2.4).abs() < 1e-9);
    engine.scale_times(&id, QUICK_GROW_FACTOR).unwrap();
    engine.scale_times(&id, QUICK_GROW_FACTOR).unwrap();
    assert_eq!(engine.decoration(&id).unwrap().scale, SCALE_MAX);
    engine.scale_by(&id, -10.0).unwrap();
    assert_eq!(engine.decoration(&id).unwrap().scale, SCALE_MIN);
}

#[test]
fn reset_rotation_and_scale() {
    let (mut engine, id) = engine_with_emoji();
    engine.set_rotation(&id, 90.0).unwrap();
    engine.set_scale(&id, 2.0).unwrap();
    engine.set_rotation(&id, 0.0).unwrap();
    engine.set_scale(&id, 1.0).unwrap();
    let dec = engine.decoration(&id).unwrap();
    assert_eq!((dec.rotation, dec.scale), (0.0, 1.0));
}

#[test]
fn editor_ops_reject_non_finite() {
    let (mut engine, id) = engine_with_emoji();
    assert!(engine.set_rotation(&id, f64::NAN).is_err());
    assert!(engine.set_scale(&id, f64::INFINITY).is_err());
    let dec = engine.decoration(&id).unwrap();
    assert_eq!((dec.rotation, dec.scale), (0.0, 1.0));
}

#[test]
fn editor_ops_on_unknown_id_do_nothing() {
    let (mut engine, _) = engine_with_emoji();
    let ghost = uuid::Uuid::new_v4();
    assert!(engine.set_rotation(&ghost, 10.0).unwrap().is_empty());
    assert!(engine.rotate_by(&ghost, 10.0).unwrap().is_empty());
    assert!(engine.scale_by(&ghost, 0.1).unwrap().is_empty());
    assert!(engine.scale_times(&ghost, 1.2).unwrap().is_empty());
    assert!(engine.remove(&ghost).is_empty());
}

#[test]
fn update_text_style_through_engine() {
    let mut engine = Engine::new();
    let id = engine.add_decoration(Content::text("Joy", TextStyle::default()).unwrap(), None);
    let patch = DecorationPatch::style(crate::doc::TextStylePatch {
        font_size: Some(100.0),
        ..Default::default()
    });
    let actions = engine.update(&id, &patch).unwrap();
    assert_eq!(actions, vec![Action::DecorationUpdated { id }, Action::RenderNeeded]);
    assert_eq!(engine.decoration(&id).unwrap().style().unwrap().font_size, 72.0);
}

// =============================================================
// Reset
// =============================================================

#[test]
fn reset_restores_everything() {
    let (mut engine, id) = engine_with_emoji();
    engine.add_decoration(Content::image("data:image/png;base64,AAAA"), None);
    engine.open_editor(&id);
    engine.scene.palette = LightPalette::Cool;
    engine.scene.show_snow = false;
    engine.scene.playing = false;
    engine.scene.toggle_ornament(2);
    down(&mut engine, 120.0, 120.0);

    let actions = engine.reset();
    assert!(actions.contains(&Action::CaptureEnded));
    assert!(actions.contains(&Action::EditorClosed));
    assert!(engine.decorations().is_empty());
    assert_eq!(engine.input, InputState::Idle);
    assert_eq!(engine.ui, UiState::default());
    assert_eq!(engine.scene, Scene::default());
}

#[test]
fn reset_during_drag_ends_capture() {
    let (mut engine, _) = engine_with_emoji();
    engine.on_pointer_down(pt(110.0, 115.0), Button::Primary, PointerKind::Touch);
    engine.on_pointer_move(pt(130.0, 115.0));
    assert!(matches!(engine.input, InputState::Dragging { .. }));

    let actions = engine.reset();
    assert_eq!(actions.iter().filter(|a| **a == Action::CaptureEnded).count(), 1);
    assert_eq!(engine.input, InputState::Idle);
    // Nothing left to release afterwards.
    assert!(!engine.reset().contains(&Action::CaptureEnded));
}

// =============================================================
// Surface mapping
// =============================================================

#[test]
fn pointer_maps_through_scaled_surface() {
    let (mut engine, id) = engine_with_emoji();
    // Rendered at half size, offset on the page.
    engine.set_surface(Surface::new(10.0, 20.0, 384.0, 350.0));
    engine.on_pointer_down(pt(70.0, 80.0), Button::Primary, PointerKind::Pen);
    assert_eq!(engine.input.engaged(), Some(id));
    // 10 client px = 20 surface px, past the threshold.
    engine.on_pointer_move(pt(80.0, 80.0));
    assert_eq!(position(&engine, &id), pt(120.0, 100.0));
}

#[test]
fn custom_threshold_from_config() {
    let cfg = EngineConfig { drag_threshold_px: 20.0, ..EngineConfig::default() };
    let mut engine = Engine::with_config(cfg);
    let id = engine.add_decoration(Content::emoji("🎁"), Some(pt(100.0, 100.0)));
    down(&mut engine, 120.0, 120.0);
    engine.on_pointer_move(pt(135.0, 120.0));
    assert_eq!(position(&engine, &id), pt(100.0, 100.0));
    engine.on_pointer_move(pt(141.0, 120.0));
    assert_eq!(position(&engine, &id), pt(121.0, 100.0));
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn scenario_scale_rotation_remove() {
    let mut engine = Engine::new();
    let d1 = engine.add_decoration(Content::emoji("🎄"), None);
    engine.set_scale(&d1, 5.0).unwrap();
    assert_eq!(engine.decoration(&d1).unwrap().scale, 3.0);
    engine.set_rotation(&d1, -30.0).unwrap();
    assert_eq!(engine.decoration(&d1).unwrap().rotation, 330.0);
    engine.remove(&d1);
    assert!(engine.decorations().is_empty());
}

#[test]
fn scenario_order_survives_drag() {
    let mut engine = Engine::new();
    let d1 = engine.add_decoration(Content::emoji("🐻"), Some(pt(100.0, 100.0)));
    let d2 = engine.add_decoration(Content::emoji("🎅"), Some(pt(400.0, 400.0)));
    down(&mut engine, 120.0, 120.0);
    engine.on_pointer_move(pt(500.0, 500.0));
    engine.on_pointer_up(pt(500.0, 500.0));
    let ids: Vec<_> = engine.decorations().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![d1, d2]);
}
