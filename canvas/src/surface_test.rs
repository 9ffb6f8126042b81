#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_distance_is_euclidean() {
    assert!((pt(0.0, 0.0).distance(pt(3.0, 4.0)) - 5.0).abs() < 1e-9);
}

#[test]
fn point_distance_is_symmetric() {
    let a = pt(-2.0, 7.5);
    let b = pt(10.0, -1.0);
    assert_eq!(a.distance(b), b.distance(a));
}

#[test]
fn point_is_finite_rejects_nan_and_inf() {
    assert!(pt(1.0, 2.0).is_finite());
    assert!(!pt(f64::NAN, 2.0).is_finite());
    assert!(!pt(1.0, f64::INFINITY).is_finite());
}

#[test]
fn point_serde_shape() {
    let json = serde_json::to_value(pt(1.5, -2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

// =============================================================
// Extent
// =============================================================

#[test]
fn extent_default_is_tree_surface() {
    let e = Extent::default();
    assert_eq!(e.width, 768.0);
    assert_eq!(e.height, 700.0);
}

#[test]
fn extent_center() {
    assert_eq!(Extent::default().center(), pt(384.0, 350.0));
}

// =============================================================
// Surface
// =============================================================

#[test]
fn to_local_subtracts_origin_at_unit_scale() {
    let s = Surface::new(100.0, 40.0, 768.0, 700.0);
    assert_eq!(s.to_local(pt(150.0, 90.0), Extent::default()), pt(50.0, 50.0));
}

#[test]
fn to_local_scales_when_css_size_differs() {
    let s = Surface::new(0.0, 0.0, 384.0, 350.0);
    assert_eq!(s.to_local(pt(100.0, 100.0), Extent::default()), pt(200.0, 200.0));
}

#[test]
fn to_local_applies_origin_and_scale_together() {
    let s = Surface::new(12.0, 34.0, 384.0, 350.0);
    assert_eq!(s.to_local(pt(112.0, 84.0), Extent::default()), pt(200.0, 100.0));
}

#[test]
fn degenerate_surface_maps_one_to_one() {
    let s = Surface::new(10.0, 10.0, 0.0, 0.0);
    assert_eq!(s.to_local(pt(15.0, 20.0), Extent::default()), pt(5.0, 10.0));
}
