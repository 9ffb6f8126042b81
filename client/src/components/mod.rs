//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the tree, its panels, and its dialogs while reading and
//! writing the shared `Engine` and `UiState` signals from Leptos context.

pub mod control_panel;
pub mod decoration_editor;
pub mod decoration_panel;
pub mod settings_panel;
pub mod status_bar;
pub mod text_decoration_dialog;
pub mod tree_host;
