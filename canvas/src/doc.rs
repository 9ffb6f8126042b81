//! Document model: decorations, their per-kind content, and the in-memory store.
//!
//! This module defines what sits on the tree (`Decoration`, `Content`), a
//! sparse-update type for incremental edits (`DecorationPatch`), and the
//! ordered store that owns every live decoration (`DecorationStore`).
//!
//! The store is the single place where decoration invariants are enforced:
//! ids are unique, `scale` stays within [`SCALE_MIN`]..=[`SCALE_MAX`],
//! `rotation` stays within `[0, 360)`, and text styles stay within their
//! clamp ranges. Store order is draw order: later decorations render above
//! earlier ones.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::{canonical_hex, normalize_hex_color};
use crate::consts::{
    EMOJI_BOX_PX, FONT_SIZE_DEFAULT, FONT_SIZE_MAX, FONT_SIZE_MIN, FULL_TURN_DEG, IMAGE_BOX_PX, SCALE_MAX, SCALE_MIN,
    TEXT_ADVANCE_RATIO, TEXT_COLOR_DEFAULT, TEXT_LINE_RATIO, TEXT_MAX_CHARS,
};
use crate::surface::Point;

/// Unique identifier for a decoration.
pub type DecorationId = Uuid;

/// Error returned when a patch would break a decoration invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// A numeric attribute was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    /// A text style was supplied for an emoji or image decoration.
    #[error("text style cannot be applied to a {kind} decoration")]
    StyleOnNonText { kind: DecorationKind },
    /// A color string was not `#rgb` or `#rrggbb`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    /// Replacement content was empty after trimming.
    #[error("decoration content cannot be empty")]
    EmptyContent,
}

/// The kind of a decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationKind {
    Emoji,
    Image,
    Text,
}

impl fmt::Display for DecorationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Emoji => "emoji",
            Self::Image => "image",
            Self::Text => "text",
        })
    }
}

/// Font families offered for text decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "Arial")]
    Arial,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    #[serde(rename = "Courier New")]
    CourierNew,
    #[serde(rename = "Georgia")]
    Georgia,
    #[serde(rename = "Verdana")]
    Verdana,
    #[serde(rename = "Comic Sans MS")]
    ComicSansMs,
    #[serde(rename = "Impact")]
    Impact,
    #[serde(rename = "Trebuchet MS")]
    TrebuchetMs,
}

impl FontFamily {
    /// Every family, in the order the text dialog lists them.
    pub const ALL: [FontFamily; 8] = [
        Self::Arial,
        Self::TimesNewRoman,
        Self::CourierNew,
        Self::Georgia,
        Self::Verdana,
        Self::ComicSansMs,
        Self::Impact,
        Self::TrebuchetMs,
    ];

    /// CSS family name.
    #[must_use]
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Arial => "Arial",
            Self::TimesNewRoman => "Times New Roman",
            Self::CourierNew => "Courier New",
            Self::Georgia => "Georgia",
            Self::Verdana => "Verdana",
            Self::ComicSansMs => "Comic Sans MS",
            Self::Impact => "Impact",
            Self::TrebuchetMs => "Trebuchet MS",
        }
    }

    /// Inverse of [`FontFamily::css_name`].
    #[must_use]
    pub fn from_css_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.css_name() == name)
    }
}

/// Stroke weight for text decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Lighter,
}

impl FontWeight {
    pub const ALL: [FontWeight; 3] = [Self::Normal, Self::Bold, Self::Lighter];

    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
            Self::Lighter => "lighter",
        }
    }
}

/// Slant for text decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

impl FontSlant {
    pub const ALL: [FontSlant; 2] = [Self::Normal, Self::Italic];

    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }
}

/// Typography of a text decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: FontFamily,
    /// Font size in pixels, kept within [`FONT_SIZE_MIN`]..=[`FONT_SIZE_MAX`].
    pub font_size: f64,
    /// Canonical lowercase `#rrggbb`.
    pub color: String,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            font_size: FONT_SIZE_DEFAULT,
            color: TEXT_COLOR_DEFAULT.to_owned(),
            weight: FontWeight::default(),
            slant: FontSlant::default(),
        }
    }
}

impl TextStyle {
    /// CSS `font` shorthand, e.g. `italic bold 24px "Times New Roman"`.
    #[must_use]
    pub fn css_font(&self) -> String {
        format!(
            "{} {} {}px \"{}\"",
            self.slant.css(),
            self.weight.css(),
            self.font_size,
            self.font_family.css_name()
        )
    }

    fn sanitized(mut self) -> Self {
        self.font_size = clamp_font_size(self.font_size);
        self.color = normalize_hex_color(&self.color, TEXT_COLOR_DEFAULT);
        self
    }
}

/// Per-kind payload of a decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Content {
    /// A single emoji glyph.
    Emoji { glyph: String },
    /// An image reference: a data URI or URL, treated as opaque.
    Image { src: String },
    /// Literal text with its own style.
    Text { text: String, style: TextStyle },
}

impl Content {
    #[must_use]
    pub fn emoji(glyph: impl Into<String>) -> Self {
        Self::Emoji { glyph: glyph.into() }
    }

    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self::Image { src: src.into() }
    }

    /// Build text content from user input: trimmed, truncated to
    /// [`TEXT_MAX_CHARS`], and rejected when nothing is left.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyContent`] when `text` is blank.
    pub fn text(text: &str, style: TextStyle) -> Result<Self, StoreError> {
        let text = clean_text(text).ok_or(StoreError::EmptyContent)?;
        Ok(Self::Text { text, style: style.sanitized() })
    }

    #[must_use]
    pub fn kind(&self) -> DecorationKind {
        match self {
            Self::Emoji { .. } => DecorationKind::Emoji,
            Self::Image { .. } => DecorationKind::Image,
            Self::Text { .. } => DecorationKind::Text,
        }
    }

    /// The glyph, image reference, or text string.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Emoji { glyph } => glyph,
            Self::Image { src } => src,
            Self::Text { text, .. } => text,
        }
    }

    /// Unscaled box size `(width, height)` in surface pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn base_size(&self) -> (f64, f64) {
        match self {
            Self::Emoji { .. } => (EMOJI_BOX_PX, EMOJI_BOX_PX),
            Self::Image { .. } => (IMAGE_BOX_PX, IMAGE_BOX_PX),
            Self::Text { text, style } => {
                let chars = text.chars().count().max(1) as f64;
                (chars * style.font_size * TEXT_ADVANCE_RATIO, style.font_size * TEXT_LINE_RATIO)
            }
        }
    }

    fn sanitized(self) -> Self {
        match self {
            Self::Text { text, style } => Self::Text {
                text: clean_text(&text).unwrap_or_default(),
                style: style.sanitized(),
            },
            other => other,
        }
    }
}

/// A decoration placed on the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub id: DecorationId,
    #[serde(flatten)]
    pub content: Content,
    /// Top-left of the unscaled box in surface coordinates.
    pub position: Point,
    /// Clockwise rotation in degrees about the box center, in `[0, 360)`.
    pub rotation: f64,
    /// Uniform scale about the box center.
    pub scale: f64,
}

impl Decoration {
    #[must_use]
    pub fn kind(&self) -> DecorationKind {
        self.content.kind()
    }

    /// Center of the box in surface coordinates; the rotation/scale pivot.
    #[must_use]
    pub fn center(&self) -> Point {
        let (w, h) = self.content.base_size();
        Point::new(self.position.x + w * 0.5, self.position.y + h * 0.5)
    }

    /// Text style, for text decorations.
    #[must_use]
    pub fn style(&self) -> Option<&TextStyle> {
        match &self.content {
            Content::Text { style, .. } => Some(style),
            _ => None,
        }
    }
}

/// Sparse update for a decoration. Only present fields are applied.
///
/// Deserialization rejects attributes outside this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecorationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Replacement glyph, image reference, or text, keeping the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Text style changes; only valid for text decorations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStylePatch>,
}

impl DecorationPatch {
    #[must_use]
    pub fn position(position: Point) -> Self {
        Self { position: Some(position), ..Self::default() }
    }

    #[must_use]
    pub fn rotation(rotation: f64) -> Self {
        Self { rotation: Some(rotation), ..Self::default() }
    }

    #[must_use]
    pub fn scale(scale: f64) -> Self {
        Self { scale: Some(scale), ..Self::default() }
    }

    #[must_use]
    pub fn style(style: TextStylePatch) -> Self {
        Self { style: Some(style), ..Self::default() }
    }

    fn validate(&self, target: &Decoration) -> Result<(), StoreError> {
        if self.position.is_some_and(|p| !p.is_finite()) {
            return Err(StoreError::NonFinite { field: "position" });
        }
        if self.rotation.is_some_and(|r| !r.is_finite()) {
            return Err(StoreError::NonFinite { field: "rotation" });
        }
        if self.scale.is_some_and(|s| !s.is_finite()) {
            return Err(StoreError::NonFinite { field: "scale" });
        }
        if let Some(body) = &self.content {
            if body.trim().is_empty() {
                return Err(StoreError::EmptyContent);
            }
        }
        if let Some(style) = &self.style {
            if target.kind() != DecorationKind::Text {
                return Err(StoreError::StyleOnNonText { kind: target.kind() });
            }
            if style.font_size.is_some_and(|s| !s.is_finite()) {
                return Err(StoreError::NonFinite { field: "font_size" });
            }
            if let Some(color) = &style.color {
                if let Err(err) = canonical_hex(color) {
                    log::debug!("color patch rejected: {err}");
                    return Err(StoreError::InvalidColor(color.clone()));
                }
            }
        }
        Ok(())
    }
}

/// Sparse update for a [`TextStyle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextStylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slant: Option<FontSlant>,
}

/// Normalize any finite angle into `[0, 360)`.
#[must_use]
pub fn normalize_rotation(deg: f64) -> f64 {
    let r = deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= FULL_TURN_DEG { 0.0 } else { r + 0.0 }
}

#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(SCALE_MIN, SCALE_MAX)
}

#[must_use]
pub fn clamp_font_size(size: f64) -> f64 {
    if size.is_finite() { size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX) } else { FONT_SIZE_DEFAULT }
}

fn clean_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(TEXT_MAX_CHARS).collect())
}

/// Ordered in-memory store of decorations.
#[derive(Debug, Clone, Default)]
pub struct DecorationStore {
    items: Vec<Decoration>,
}

impl DecorationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a decoration with a fresh id at `position`, unrotated and unscaled.
    ///
    /// Content is sanitized (text trimmed, font size clamped, color normalized)
    /// and non-finite coordinates are replaced with `0`, so this never fails.
    pub fn add(&mut self, content: Content, position: Point) -> DecorationId {
        let mut id = Uuid::new_v4();
        while self.contains(&id) {
            id = Uuid::new_v4();
        }
        let position = Point::new(finite_or_zero(position.x), finite_or_zero(position.y));
        self.items.push(Decoration { id, content: content.sanitized(), position, rotation: 0.0, scale: 1.0 });
        id
    }

    /// Apply a partial update to the decoration with `id`.
    ///
    /// Returns `Ok(false)` when no such decoration exists. A malformed patch
    /// is rejected as a whole, leaving the decoration untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] describing the first invalid attribute.
    pub fn update(&mut self, id: &DecorationId, patch: &DecorationPatch) -> Result<bool, StoreError> {
        let Some(dec) = self.items.iter_mut().find(|d| d.id == *id) else {
            return Ok(false);
        };
        patch.validate(dec)?;

        if let Some(p) = patch.position {
            dec.position = p;
        }
        if let Some(r) = patch.rotation {
            dec.rotation = r;
        }
        if let Some(s) = patch.scale {
            dec.scale = s;
        }
        if let Some(body) = &patch.content {
            let body = body.trim();
            match &mut dec.content {
                Content::Emoji { glyph } => body.clone_into(glyph),
                Content::Image { src } => body.clone_into(src),
                Content::Text { text, .. } => *text = clean_text(body).unwrap_or_default(),
            }
        }
        if let (Some(sp), Content::Text { style, .. }) = (&patch.style, &mut dec.content) {
            if let Some(family) = sp.font_family {
                style.font_family = family;
            }
            if let Some(size) = sp.font_size {
                style.font_size = size;
            }
            if let Some(color) = &sp.color {
                style.color = normalize_hex_color(color, &style.color);
            }
            if let Some(weight) = sp.weight {
                style.weight = weight;
            }
            if let Some(slant) = sp.slant {
                style.slant = slant;
            }
            style.font_size = clamp_font_size(style.font_size);
        }

        dec.scale = clamp_scale(dec.scale);
        dec.rotation = normalize_rotation(dec.rotation);
        Ok(true)
    }

    /// Remove a decoration by id, returning it if it was present.
    pub fn remove(&mut self, id: &DecorationId) -> Option<Decoration> {
        let idx = self.items.iter().position(|d| d.id == *id)?;
        Some(self.items.remove(idx))
    }

    /// Remove every decoration.
    pub fn reset(&mut self) {
        self.items.clear();
    }

    /// All decorations in insertion (draw) order.
    #[must_use]
    pub fn list(&self) -> &[Decoration] {
        &self.items
    }

    /// Owned copy of [`DecorationStore::list`].
    #[must_use]
    pub fn snapshot(&self) -> Vec<Decoration> {
        self.items.clone()
    }

    #[must_use]
    pub fn get(&self, id: &DecorationId) -> Option<&Decoration> {
        self.items.iter().find(|d| d.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &DecorationId) -> bool {
        self.items.iter().any(|d| d.id == *id)
    }

    /// Number of decorations currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store contains no decorations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
