//! Draft state for the "add text decoration" dialog.

#[cfg(test)]
#[path = "text_draft_test.rs"]
mod text_draft_test;

use canvas::consts::TEXT_MAX_CHARS;
use canvas::doc::{Content, FontFamily, FontSlant, FontWeight, StoreError, TextStyle, clamp_font_size};

/// Text and style being composed in the dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextDraft {
    pub text: String,
    pub style: TextStyle,
}

impl TextDraft {
    /// Replace the text, cutting it at [`TEXT_MAX_CHARS`] characters.
    pub fn set_text(&mut self, raw: &str) {
        self.text = raw.chars().take(TEXT_MAX_CHARS).collect();
    }

    pub fn set_font_family(&mut self, name: &str) {
        if let Some(family) = FontFamily::from_css_name(name) {
            self.style.font_family = family;
        }
    }

    pub fn set_font_size(&mut self, size: f64) {
        if size.is_finite() {
            self.style.font_size = clamp_font_size(size);
        }
    }

    pub fn set_weight(&mut self, css: &str) {
        if let Some(weight) = FontWeight::ALL.into_iter().find(|w| w.css() == css) {
            self.style.weight = weight;
        }
    }

    pub fn set_slant(&mut self, css: &str) {
        if let Some(slant) = FontSlant::ALL.into_iter().find(|s| s.css() == css) {
            self.style.slant = slant;
        }
    }

    /// Set the color when `raw` is a hex color; other input is ignored.
    pub fn set_color(&mut self, raw: &str) {
        match canvas::color::canonical_hex(raw) {
            Ok(color) => self.style.color = color,
            Err(err) => log::debug!("text color {raw:?} ignored: {err}"),
        }
    }

    pub fn remaining_chars(&self) -> usize {
        TEXT_MAX_CHARS.saturating_sub(self.text.chars().count())
    }

    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Content for the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyContent`] when the text is blank.
    pub fn to_content(&self) -> Result<Content, StoreError> {
        Content::text(&self.text, self.style.clone())
    }
}
