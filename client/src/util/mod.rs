//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from component
//! logic to improve reuse and testability. Pure helpers build natively;
//! browser glue is gated behind the `csr` feature.

pub mod canvas_input;
pub mod editor_layout;
pub mod export;
#[cfg(feature = "csr")]
pub mod listeners;
pub mod presets;
pub mod query;
pub mod upload;
