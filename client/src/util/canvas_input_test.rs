use super::*;

// =============================================================
// PointerPolicy
// =============================================================

#[test]
fn policy_accepts_first_input_of_any_kind() {
    assert!(PointerPolicy::new().accept_kind(PointerKind::Touch, 0.0));
    assert!(PointerPolicy::new().accept_kind(PointerKind::Mouse, 0.0));
    assert!(PointerPolicy::new().accept_kind(PointerKind::Pen, 0.0));
}

#[test]
fn policy_rejects_mouse_right_after_touch() {
    let mut policy = PointerPolicy::new();
    assert!(policy.accept_kind(PointerKind::Touch, 1_000.0));
    assert!(!policy.accept_kind(PointerKind::Mouse, 1_300.0));
    // The rejected mouse did not become the reference kind.
    assert!(policy.accept_kind(PointerKind::Touch, 1_400.0));
}

#[test]
fn policy_accepts_other_kind_after_cooldown() {
    let mut policy = PointerPolicy::new();
    assert!(policy.accept_kind(PointerKind::Touch, 1_000.0));
    assert!(policy.accept_kind(PointerKind::Mouse, 1_000.0 + INPUT_KIND_COOLDOWN_MS));
    // Mouse is now the reference, so an immediate touch is filtered.
    assert!(!policy.accept_kind(PointerKind::Touch, 1_100.0 + INPUT_KIND_COOLDOWN_MS));
}

#[test]
fn policy_same_kind_refreshes_timestamp() {
    let mut policy = PointerPolicy::new();
    assert!(policy.accept_kind(PointerKind::Touch, 0.0));
    assert!(policy.accept_kind(PointerKind::Touch, 1_900.0));
    // Cooldown now runs from the second touch.
    assert!(!policy.accept_kind(PointerKind::Mouse, 2_500.0));
}

#[test]
fn compat_events_rejected_shortly_after_touch() {
    let mut policy = PointerPolicy::new();
    assert!(policy.accepts_compat(0.0));
    assert!(policy.accept_kind(PointerKind::Touch, 1_000.0));
    assert!(!policy.accepts_compat(1_500.0));
    assert!(policy.accepts_compat(1_000.0 + INPUT_KIND_COOLDOWN_MS));
}

#[test]
fn compat_events_accepted_after_mouse_or_pen() {
    let mut policy = PointerPolicy::new();
    assert!(policy.accept_kind(PointerKind::Pen, 0.0));
    assert!(policy.accepts_compat(10.0));
    assert!(policy.accept_kind(PointerKind::Mouse, 5_000.0));
    assert!(policy.accepts_compat(5_010.0));
}

// =============================================================
// pick_touch
// =============================================================

#[test]
fn pick_touch_follows_tracked_identifier() {
    let touches = [(3, CanvasPoint::new(1.0, 2.0)), (7, CanvasPoint::new(30.0, 40.0))];
    assert_eq!(pick_touch(touches, 7), Some(CanvasPoint::new(30.0, 40.0)));
    assert_eq!(pick_touch(touches, 3), Some(CanvasPoint::new(1.0, 2.0)));
}

#[test]
fn pick_touch_ignores_other_fingers() {
    let second_finger = [(9, CanvasPoint::new(500.0, 500.0))];
    assert_eq!(pick_touch(second_finger, 3), None);
    assert_eq!(pick_touch([], 3), None);
}

// =============================================================
// backing_size
// =============================================================

#[test]
fn backing_size_scales_by_device_ratio() {
    assert_eq!(backing_size(Extent::default(), 1.0), (768, 700));
    assert_eq!(backing_size(Extent::default(), 2.0), (1536, 1400));
    assert_eq!(backing_size(Extent::default(), 1.5), (1152, 1050));
}

#[test]
fn backing_size_ignores_bad_ratio() {
    assert_eq!(backing_size(Extent::default(), 0.0), (768, 700));
    assert_eq!(backing_size(Extent::default(), f64::NAN), (768, 700));
}

// =============================================================
// Mapping
// =============================================================

#[test]
fn map_button_matches_dom_numbering() {
    assert_eq!(map_button(0), CanvasButton::Primary);
    assert_eq!(map_button(1), CanvasButton::Middle);
    assert_eq!(map_button(2), CanvasButton::Secondary);
    assert_eq!(map_button(4), CanvasButton::Primary);
}

#[test]
fn map_pointer_kind_known_and_unknown() {
    assert_eq!(map_pointer_kind("touch"), PointerKind::Touch);
    assert_eq!(map_pointer_kind("pen"), PointerKind::Pen);
    assert_eq!(map_pointer_kind("mouse"), PointerKind::Mouse);
    assert_eq!(map_pointer_kind(""), PointerKind::Mouse);
}

#[test]
fn prevent_default_only_for_editor_keys() {
    assert!(should_prevent_default_key("Delete"));
    assert!(should_prevent_default_key("Backspace"));
    assert!(should_prevent_default_key("Escape"));
    assert!(!should_prevent_default_key("Enter"));
    assert!(!should_prevent_default_key("a"));
}

#[test]
fn capture_events_follow_pointer_kind() {
    assert_eq!(capture_events(PointerKind::Touch), ["touchmove", "touchend", "touchcancel"]);
    assert_eq!(capture_events(PointerKind::Mouse), ["pointermove", "pointerup", "pointercancel"]);
    assert_eq!(capture_events(PointerKind::Pen), capture_events(PointerKind::Mouse));
}
