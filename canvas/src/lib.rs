//! Decoration engine and renderer for the Christmas tree decorator.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but
//! everything except [`render`] is plain data and logic that builds and tests
//! natively. It owns the decoration store, the gesture state machine that
//! turns pointer input into store mutations, hit-testing, the tree's static
//! geometry and animation, and Canvas2D drawing. The host (the Leptos client)
//! wires DOM events to the [`engine::Engine`] and applies the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction controller and session state |
//! | [`doc`] | Decoration types and the in-memory store |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against rotated, scaled decorations |
//! | [`surface`] | Client-to-surface coordinate mapping |
//! | [`tree`] | Scene settings, tree geometry, ornaments, snow |
//! | [`render`] | Canvas2D drawing and the image cache |
//! | [`config`] | Engine tunables and override parsing |
//! | [`color`] | Hex color parsing and normalization |
//! | [`consts`] | Shared numeric constants (scale limits, box sizes, etc.) |

pub mod color;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
pub mod surface;
pub mod tree;
