//! Shared numeric constants for the canvas crate.

// ── Decoration limits ───────────────────────────────────────────

/// Smallest allowed decoration scale factor.
pub const SCALE_MIN: f64 = 0.3;

/// Largest allowed decoration scale factor.
pub const SCALE_MAX: f64 = 3.0;

/// Full turn in degrees; rotations are kept in `[0, FULL_TURN_DEG)`.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Smallest text decoration font size in pixels.
pub const FONT_SIZE_MIN: f64 = 12.0;

/// Largest text decoration font size in pixels.
pub const FONT_SIZE_MAX: f64 = 72.0;

/// Font size used when the text dialog is opened.
pub const FONT_SIZE_DEFAULT: f64 = 24.0;

/// Maximum number of characters in a text decoration.
pub const TEXT_MAX_CHARS: usize = 20;

/// Text color used when the caller supplies an unparseable one.
pub const TEXT_COLOR_DEFAULT: &str = "#ff0000";

// ── Decoration boxes ────────────────────────────────────────────

/// Edge length of an emoji decoration's unscaled box.
pub const EMOJI_BOX_PX: f64 = 40.0;

/// Glyph size used when drawing emoji decorations.
pub const EMOJI_FONT_PX: f64 = 36.0;

/// Edge length of an image decoration's unscaled box.
pub const IMAGE_BOX_PX: f64 = 64.0;

/// Approximate advance of one text glyph relative to the font size.
pub const TEXT_ADVANCE_RATIO: f64 = 0.6;

/// Line box height relative to the font size.
pub const TEXT_LINE_RATIO: f64 = 1.2;

// ── Interaction defaults ────────────────────────────────────────

/// Pointer travel (surface pixels) that turns a press into a drag.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Scale change applied per wheel notch.
pub const SCALE_STEP: f64 = 0.1;

/// Rotation applied per double-click or rotate button press.
pub const ROTATE_STEP_DEG: f64 = 45.0;

/// Delay between a resolved click and opening the editor.
pub const CLICK_SETTLE_MS: u32 = 10;

/// Quick-shrink factor offered by the editor.
pub const QUICK_SHRINK_FACTOR: f64 = 0.8;

/// Quick-grow factor offered by the editor.
pub const QUICK_GROW_FACTOR: f64 = 1.2;

// ── Surface ─────────────────────────────────────────────────────

/// Logical width of the tree surface.
pub const SURFACE_WIDTH: f64 = 768.0;

/// Logical height of the tree surface.
pub const SURFACE_HEIGHT: f64 = 700.0;

// ── Export ──────────────────────────────────────────────────────

/// Pixel density of exported images relative to the logical surface.
pub const EXPORT_PIXEL_RATIO: f64 = 2.0;

/// Height of the title band above the tree in exported images.
pub const EXPORT_TITLE_BAND_PX: f64 = 84.0;

/// Height of the subtitle band above the tree in exported images.
pub const EXPORT_SUBTITLE_BAND_PX: f64 = 36.0;

/// Scene title shown above the tree.
pub const TITLE_TEXT: &str = "Merry Christmas 2025";

/// Scene subtitle shown under the title.
pub const SUBTITLE_TEXT: &str = "Decorate your very own tree and make a Christmas memory";
