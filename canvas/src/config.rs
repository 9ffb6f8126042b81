//! Engine configuration with defaults and string-keyed overrides.
//!
//! The host supplies overrides through a lookup closure (the page query
//! string in the browser, a map in tests). Absent keys keep their defaults;
//! present keys that do not parse are errors.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{CLICK_SETTLE_MS, DRAG_THRESHOLD_PX, ROTATE_STEP_DEG, SCALE_STEP};
use crate::surface::Extent;

/// Configuration error for a single key.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The value could not be parsed or is out of range.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid { key: &'static str, value: String, reason: &'static str },
}

/// Tunables for the interaction controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Pointer travel in surface pixels before a press becomes a drag.
    pub drag_threshold_px: f64,
    /// Scale change per wheel notch.
    pub scale_step: f64,
    /// Rotation per double-click or rotate button.
    pub rotate_step_deg: f64,
    /// Delay before the editor opens after a click.
    pub click_settle_ms: u32,
    /// Logical surface size.
    pub extent: Extent,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            scale_step: SCALE_STEP,
            rotate_step_deg: ROTATE_STEP_DEG,
            click_settle_ms: CLICK_SETTLE_MS,
            extent: Extent::default(),
        }
    }
}

impl EngineConfig {
    /// Build a config from defaults plus overrides returned by `lookup`.
    ///
    /// Recognized keys:
    /// - `drag_threshold`: non-negative pixels (default 5)
    /// - `scale_step`: positive factor delta (default 0.1)
    /// - `rotate_step`: degrees, non-zero (default 45)
    /// - `click_settle_ms`: milliseconds (default 10)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for the first value that fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup("drag_threshold") {
            cfg.drag_threshold_px = parse_f64("drag_threshold", &raw, |v| v >= 0.0)?;
        }
        if let Some(raw) = lookup("scale_step") {
            cfg.scale_step = parse_f64("scale_step", &raw, |v| v > 0.0)?;
        }
        if let Some(raw) = lookup("rotate_step") {
            cfg.rotate_step_deg = parse_f64("rotate_step", &raw, |v| v != 0.0)?;
        }
        if let Some(raw) = lookup("click_settle_ms") {
            cfg.click_settle_ms = match raw.trim().parse::<u32>() {
                Ok(v) => v,
                Err(_) => return Err(invalid("click_settle_ms", &raw, "expected whole milliseconds")),
            };
        }
        Ok(cfg)
    }
}

fn parse_f64(key: &'static str, raw: &str, accept: impl Fn(f64) -> bool) -> Result<f64, ConfigError> {
    let value = match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return Err(invalid(key, raw, "expected a finite number")),
    };
    if !accept(value) {
        return Err(invalid(key, raw, "out of range"));
    }
    Ok(value)
}

fn invalid(key: &'static str, raw: &str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { key, value: raw.to_owned(), reason }
}
