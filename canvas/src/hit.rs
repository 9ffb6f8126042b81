#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Decoration, DecorationId, DecorationStore};
use crate::surface::Point;

/// Test which decoration (if any) is under `pt`, topmost first.
///
/// Store order is draw order, so the last decoration whose transformed box
/// contains `pt` wins.
#[must_use]
pub fn hit_test(pt: Point, doc: &DecorationStore) -> Option<DecorationId> {
    doc.list().iter().rev().find(|d| contains(d, pt)).map(|d| d.id)
}

/// Whether `pt` lies inside the decoration's rotated and scaled box.
#[must_use]
pub fn contains(dec: &Decoration, pt: Point) -> bool {
    let local = to_box_local(dec, pt);
    let (w, h) = dec.content.base_size();
    let half_w = w * dec.scale * 0.5;
    let half_h = h * dec.scale * 0.5;
    local.x.abs() <= half_w && local.y.abs() <= half_h
}

/// Map a surface point into the decoration's unrotated frame, centered on
/// the box center.
fn to_box_local(dec: &Decoration, pt: Point) -> Point {
    let c = dec.center();
    let dx = pt.x - c.x;
    let dy = pt.y - c.y;
    let rad = (-dec.rotation).to_radians();
    let (sin, cos) = rad.sin_cos();
    Point::new(dx * cos - dy * sin, dx * sin + dy * cos)
}
