//! Tree scene: presentational settings and the static geometry of the tree.
//!
//! Everything here is deterministic. Animated layers (snow, twinkle, the top
//! star's bob) are pure functions of a millisecond clock supplied by the host,
//! so the renderer and tests agree on where things are at any instant.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::surface::{Extent, Point};

/// Color scheme for the ornament lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightPalette {
    #[default]
    Rainbow,
    Warm,
    Cool,
}

impl LightPalette {
    pub const ALL: [LightPalette; 3] = [Self::Rainbow, Self::Warm, Self::Cool];

    #[must_use]
    pub fn colors(self) -> &'static [&'static str] {
        match self {
            Self::Rainbow => &["#FF6B9D", "#C44569", "#FFA502", "#FFD93D", "#6BCB77", "#4D96FF", "#A569BD", "#EC7063"],
            Self::Warm => &["#FFD93D", "#FFA502", "#FF6B6B", "#C44569"],
            Self::Cool => &["#4D96FF", "#6BCB77", "#A569BD", "#48C9B0"],
        }
    }

    /// Light color for ornament `index`, cycling through the palette.
    #[must_use]
    pub fn color_for(self, index: usize) -> &'static str {
        let colors = self.colors();
        colors[index % colors.len()]
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rainbow => "Rainbow",
            Self::Warm => "Warm",
            Self::Cool => "Cool",
        }
    }
}

/// Scene-wide presentational settings. Last write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub palette: LightPalette,
    pub show_snow: bool,
    pub show_lights: bool,
    pub show_title: bool,
    pub show_subtitle: bool,
    /// Whether ambient animation (twinkle, star spin) runs.
    pub playing: bool,
    /// Ornament indices the user has switched to glow.
    pub lit: BTreeSet<usize>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            palette: LightPalette::default(),
            show_snow: true,
            show_lights: true,
            show_title: true,
            show_subtitle: true,
            playing: true,
            lit: BTreeSet::new(),
        }
    }
}

impl Scene {
    /// Flip the glow of ornament `index`, returning the new state.
    pub fn toggle_ornament(&mut self, index: usize) -> bool {
        if self.lit.remove(&index) {
            false
        } else {
            self.lit.insert(index);
            true
        }
    }

    #[must_use]
    pub fn is_lit(&self, index: usize) -> bool {
        self.lit.contains(&index)
    }

    /// Whether anything on the surface changes over time.
    #[must_use]
    pub fn animates(&self) -> bool {
        self.show_snow || (self.playing && self.show_lights)
    }
}

// ── Tiers and trunk ────────────────────────────────────────────

/// Padding above the top tier.
pub const TREE_TOP_PAD: f64 = 16.0;

/// How far each tier slides up under the one above it.
pub const TIER_OVERLAP: f64 = 24.0;

/// Inset of the lighter inner triangle of each tier.
pub const TIER_INSET: f64 = 5.0;

/// Gap between the bottom tier and the trunk.
pub const TRUNK_GAP: f64 = 8.0;

pub const TRUNK_WIDTH: f64 = 80.0;
pub const TRUNK_HEIGHT: f64 = 96.0;

/// `(half_width, height)` of each tier, top to bottom.
const TIER_DIMENSIONS: [(f64, f64); 4] = [(100.0, 140.0), (140.0, 150.0), (180.0, 170.0), (220.0, 180.0)];

/// An isosceles triangle pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub apex: Point,
    pub half_width: f64,
    pub height: f64,
}

impl Tier {
    /// The lighter triangle drawn inside this one.
    #[must_use]
    pub fn inner(&self) -> Tier {
        Tier {
            apex: Point::new(self.apex.x, self.apex.y + 2.0),
            half_width: self.half_width - TIER_INSET,
            height: self.height - TIER_INSET,
        }
    }

    #[must_use]
    pub fn base_y(&self) -> f64 {
        self.apex.y + self.height
    }
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The four stacked tiers, top to bottom, centered on the surface.
#[must_use]
pub fn tiers(extent: Extent) -> Vec<Tier> {
    let cx = extent.width * 0.5;
    let mut top = TREE_TOP_PAD;
    let mut out = Vec::with_capacity(TIER_DIMENSIONS.len());
    for (i, (half_width, height)) in TIER_DIMENSIONS.into_iter().enumerate() {
        if i > 0 {
            top -= TIER_OVERLAP;
        }
        out.push(Tier { apex: Point::new(cx, top), half_width, height });
        top += height;
    }
    out
}

/// Trunk rectangle below the bottom tier.
#[must_use]
pub fn trunk(extent: Extent) -> Rect {
    let bottom = tiers(extent).last().map_or(TREE_TOP_PAD, Tier::base_y);
    Rect {
        x: extent.width * 0.5 - TRUNK_WIDTH * 0.5,
        y: bottom + TRUNK_GAP,
        width: TRUNK_WIDTH,
        height: TRUNK_HEIGHT,
    }
}

// ── Top star ───────────────────────────────────────────────────

pub const STAR_OUTER_RADIUS: f64 = 34.0;
pub const STAR_INNER_RADIUS: f64 = 14.0;

const STAR_REST_Y: f64 = 28.0;
const STAR_FLOAT_PERIOD_MS: f64 = 3000.0;
const STAR_FLOAT_AMPLITUDE: f64 = 6.0;
const STAR_SPIN_PERIOD_MS: f64 = 20_000.0;

/// Center and rotation (degrees) of the top star at `now_ms`.
///
/// The star always bobs; it spins only while the scene is playing.
#[must_use]
pub fn star_pose(extent: Extent, now_ms: f64, playing: bool) -> (Point, f64) {
    let bob = (now_ms / STAR_FLOAT_PERIOD_MS * TAU).sin() * STAR_FLOAT_AMPLITUDE;
    let spin = if playing { (now_ms / STAR_SPIN_PERIOD_MS).fract() * 360.0 } else { 0.0 };
    (Point::new(extent.width * 0.5, STAR_REST_Y + bob), spin)
}

// ── Ornaments ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrnamentShape {
    Ball,
    Star,
}

/// A fixed light on the tree, positioned in percent of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ornament {
    pub top_pct: f64,
    pub left_pct: f64,
    pub size: f64,
    pub shape: OrnamentShape,
}

impl Ornament {
    const fn new(top_pct: f64, left_pct: f64, size: f64, shape: OrnamentShape) -> Self {
        Self { top_pct, left_pct, size, shape }
    }

    #[must_use]
    pub fn center(&self, extent: Extent) -> Point {
        Point::new(extent.width * self.left_pct / 100.0, extent.height * self.top_pct / 100.0)
    }
}

/// Smallest hit radius for an ornament, so tiny lights stay clickable.
pub const ORNAMENT_MIN_HIT_RADIUS: f64 = 8.0;

use OrnamentShape::{Ball, Star};

pub const ORNAMENTS: [Ornament; 29] = [
    Ornament::new(12.0, 50.0, 12.0, Star),
    Ornament::new(18.0, 45.0, 8.0, Ball),
    Ornament::new(18.0, 55.0, 8.0, Ball),
    Ornament::new(26.0, 38.0, 10.0, Ball),
    Ornament::new(26.0, 62.0, 10.0, Ball),
    Ornament::new(30.0, 50.0, 9.0, Star),
    Ornament::new(32.0, 42.0, 8.0, Ball),
    Ornament::new(32.0, 58.0, 8.0, Ball),
    Ornament::new(40.0, 33.0, 11.0, Ball),
    Ornament::new(40.0, 67.0, 11.0, Ball),
    Ornament::new(44.0, 44.0, 9.0, Star),
    Ornament::new(44.0, 56.0, 9.0, Star),
    Ornament::new(48.0, 38.0, 8.0, Ball),
    Ornament::new(48.0, 50.0, 10.0, Ball),
    Ornament::new(48.0, 62.0, 8.0, Ball),
    Ornament::new(56.0, 28.0, 11.0, Ball),
    Ornament::new(56.0, 72.0, 11.0, Ball),
    Ornament::new(60.0, 40.0, 10.0, Star),
    Ornament::new(60.0, 60.0, 10.0, Star),
    Ornament::new(62.0, 50.0, 12.0, Ball),
    Ornament::new(64.0, 34.0, 9.0, Ball),
    Ornament::new(64.0, 66.0, 9.0, Ball),
    Ornament::new(70.0, 25.0, 10.0, Ball),
    Ornament::new(70.0, 75.0, 10.0, Ball),
    Ornament::new(72.0, 38.0, 8.0, Star),
    Ornament::new(72.0, 50.0, 9.0, Ball),
    Ornament::new(72.0, 62.0, 8.0, Star),
    Ornament::new(76.0, 32.0, 8.0, Ball),
    Ornament::new(76.0, 68.0, 8.0, Ball),
];

/// Index of the ornament under `pt`, nearest first when hit regions overlap.
#[must_use]
pub fn ornament_at(pt: Point, extent: Extent) -> Option<usize> {
    ORNAMENTS
        .iter()
        .enumerate()
        .map(|(i, o)| (i, o.center(extent).distance(pt), (o.size * 0.5).max(ORNAMENT_MIN_HIT_RADIUS)))
        .filter(|(_, dist, radius)| dist <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _, _)| i)
}

const TWINKLE_PERIOD_MS: f64 = 2000.0;
const TWINKLE_STAGGER_MS: f64 = 150.0;

/// Opacity of ornament `index` at `now_ms`, in `[0.5, 1.0]`.
///
/// Ornaments twinkle out of phase, each delayed by 150 ms from the previous.
/// A paused scene holds every light at full opacity.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn twinkle(index: usize, now_ms: f64, playing: bool) -> f64 {
    if !playing {
        return 1.0;
    }
    let t = (now_ms - index as f64 * TWINKLE_STAGGER_MS) / TWINKLE_PERIOD_MS;
    0.75 + 0.25 * (t * TAU).cos()
}

// ── Snow ───────────────────────────────────────────────────────

/// Number of flakes in the snow field.
pub const SNOWFLAKE_COUNT: usize = 60;

/// A snowflake's position and look at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snowflake {
    pub center: Point,
    pub radius: f64,
    pub alpha: f64,
}

/// The snow field at `now_ms`.
///
/// Each flake's column, size, speed, and phase come from a hash of its index,
/// so the field is identical across frames and reloads.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn snowflakes(extent: Extent, now_ms: f64) -> Vec<Snowflake> {
    let span = extent.height + 20.0;
    (0..SNOWFLAKE_COUNT)
        .map(|i| {
            let seed = i as u64;
            let column = unit(seed, 0);
            let radius = 1.5 + unit(seed, 1) * 2.5;
            let speed = 0.02 + unit(seed, 2) * 0.04; // px per ms
            let phase = unit(seed, 3) * span;
            let sway = (now_ms / 1000.0 + unit(seed, 4) * TAU).sin() * 12.0;
            let y = (phase + now_ms * speed).rem_euclid(span) - 10.0;
            Snowflake {
                center: Point::new(column * extent.width + sway, y),
                radius,
                alpha: 0.5 + unit(seed, 5) * 0.4,
            }
        })
        .collect()
}

/// Deterministic value in `[0, 1)` for `(seed, lane)`.
#[allow(clippy::cast_precision_loss)]
fn unit(seed: u64, lane: u64) -> f64 {
    // splitmix64 finalizer
    let mut z = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(lane.wrapping_mul(0xBF58_476D_1CE4_E5B9));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64
}
