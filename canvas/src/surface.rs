#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use serde::{Deserialize, Serialize};

use crate::consts::{SURFACE_HEIGHT, SURFACE_WIDTH};

/// A point in either client (page) space or surface space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Logical size of the tree surface. Decoration positions live in this space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self { width: SURFACE_WIDTH, height: SURFACE_HEIGHT }
    }
}

impl Extent {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Bounding rectangle of the rendered surface in client coordinates.
///
/// The host refreshes this before each interaction because layout can change
/// between gestures. `width`/`height` are the CSS size, which may differ from
/// the logical [`Extent`] when the canvas is scaled by the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self { left: 0.0, top: 0.0, width: SURFACE_WIDTH, height: SURFACE_HEIGHT }
    }
}

impl Surface {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a client-space point into surface coordinates.
    #[must_use]
    pub fn to_local(&self, client: Point, extent: Extent) -> Point {
        let (sx, sy) = self.ratios(extent);
        Point {
            x: (client.x - self.left) * sx,
            y: (client.y - self.top) * sy,
        }
    }

    /// Logical units per CSS pixel on each axis. Degenerate rects map 1:1.
    fn ratios(&self, extent: Extent) -> (f64, f64) {
        let sx = if self.width > 0.0 { extent.width / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { extent.height / self.height } else { 1.0 };
        (sx, sy)
    }
}
