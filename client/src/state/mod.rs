//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The decoration store and scene settings live in `canvas::engine::Engine`,
//! held in an app-level signal. These modules hold only presentation state
//! that the engine has no reason to know about.

pub mod text_draft;
pub mod ui;
