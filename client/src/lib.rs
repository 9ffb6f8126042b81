//! # client
//!
//! Leptos CSR frontend for the Christmas tree decorator.
//!
//! This crate contains the root application, panels and dialogs, transient
//! UI state, and the browser glue (document listeners, file upload, PNG
//! export). The decoration store and gesture engine live in the `canvas`
//! crate; [`components::tree_host::TreeHost`] bridges the two.

pub mod app;
pub mod components;
pub mod state;
pub mod util;

/// Install panic and logging hooks and mount [`app::App`] on `<body>`.
#[cfg(feature = "csr")]
pub fn mount() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("logger already initialized: {err}");
    }
    leptos::mount::mount_to_body(app::App);
}
