//! Hex color parsing and normalization for text decorations.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Why a string is not a hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color must start with '#'")]
    MissingHash,
    #[error("color must have 3 or 6 hex digits, found {0}")]
    Length(usize),
    #[error("invalid hex digits {0:?}")]
    Digits(String),
}

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
///
/// # Errors
///
/// Returns [`ColorError`] describing the first problem with `raw`.
pub fn parse_hex_rgb(raw: &str) -> Result<(u8, u8, u8), ColorError> {
    let hex = raw.trim().strip_prefix('#').ok_or(ColorError::MissingHash)?;
    if !hex.is_ascii() {
        return Err(ColorError::Digits(hex.to_owned()));
    }
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1].repeat(2))?;
            let g = channel(&hex[1..2].repeat(2))?;
            let b = channel(&hex[2..3].repeat(2))?;
            Ok((r, g, b))
        }
        6 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            Ok((r, g, b))
        }
        n => Err(ColorError::Length(n)),
    }
}

fn channel(pair: &str) -> Result<u8, ColorError> {
    u8::from_str_radix(pair, 16).map_err(|_| ColorError::Digits(pair.to_owned()))
}

/// Canonical lowercase `#rrggbb` form of `value`.
///
/// # Errors
///
/// Returns [`ColorError`] if `value` is not a hex color.
pub fn canonical_hex(value: &str) -> Result<String, ColorError> {
    parse_hex_rgb(value).map(|(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
}

/// Normalize a color to canonical lowercase `#rrggbb`, using `fallback` when
/// `value` does not parse.
#[must_use]
pub fn normalize_hex_color(value: &str, fallback: &str) -> String {
    match canonical_hex(value) {
        Ok(color) => color,
        Err(err) => {
            log::debug!("color {value:?} replaced: {err}");
            match canonical_hex(fallback) {
                Ok(color) => color,
                Err(err) => {
                    log::debug!("fallback color {fallback:?} replaced: {err}");
                    crate::consts::TEXT_COLOR_DEFAULT.to_owned()
                }
            }
        }
    }
}
