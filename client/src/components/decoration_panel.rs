//! Side panel for adding decorations and exporting the tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! Emoji presets add straight to the engine. Uploads read the picked file
//! asynchronously before adding; the text button hands off to
//! `TextDecorationDialog`; export is requested here and performed by
//! `TreeHost`, which owns the image cache.

use leptos::prelude::*;

use canvas::doc::Content;
use canvas::engine::Engine;

use crate::state::ui::UiState;
use crate::util::presets::{EMOJI_PRESETS, TIPS};

/// Decoration picker, upload, text, and export controls.
#[component]
pub fn DecorationPanel() -> impl IntoView {
    let engine = expect_context::<RwSignal<Engine>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let file_input = NodeRef::<leptos::html::Input>::new();

    let uploading = move || ui.with(|u| u.uploading);
    let exporting = move || ui.with(|u| u.exporting);

    let on_upload_click = move |_| {
        #[cfg(feature = "csr")]
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_file_change = move |_ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let Some(input) = file_input.get() else {
                return;
            };
            start_upload(engine, ui, &input);
        }
    };

    let on_add_text = move |_| {
        ui.update(|u| u.text_dialog_open = true);
    };

    let on_export = move |_| {
        if !ui.try_update(UiState::request_export).unwrap_or(false) {
            log::debug!("export already running");
        }
    };

    view! {
        <div class="decoration-panel">
            <h2 class="decoration-panel__title">"Decorations"</h2>
            <div class="decoration-panel__grid">
                {EMOJI_PRESETS
                    .iter()
                    .map(|preset| {
                        let glyph = preset.glyph;
                        view! {
                            <button
                                class="decoration-panel__emoji"
                                title=preset.label
                                aria-label=preset.label
                                on:click=move |_| {
                                    engine.try_update(|e| e.add_decoration(Content::emoji(glyph), None));
                                }
                            >
                                {glyph}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>

            <div class="decoration-panel__actions">
                <input
                    node_ref=file_input
                    class="decoration-panel__file"
                    type="file"
                    accept="image/*"
                    on:change=on_file_change
                />
                <button class="btn" disabled=uploading on:click=on_upload_click>
                    {move || if uploading() { "Uploading…" } else { "Upload image" }}
                </button>
                <button class="btn" on:click=on_add_text>
                    "Add text"
                </button>
                <button class="btn btn--primary" disabled=exporting on:click=on_export>
                    {move || if exporting() { "Exporting…" } else { "Save as image" }}
                </button>
            </div>

            <ul class="decoration-panel__tips">
                {TIPS.iter().map(|tip| view! { <li>{*tip}</li> }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
}

/// Read the selected file and add it as an image decoration.
#[cfg(feature = "csr")]
fn start_upload(engine: RwSignal<Engine>, ui: RwSignal<UiState>, input: &web_sys::HtmlInputElement) {
    use crate::components::status_bar::show_status;
    use crate::state::ui::StatusKind;
    use crate::util::upload::{read_as_data_url, selected_file};

    let file = match selected_file(input) {
        Ok(file) => file,
        Err(err) => {
            log::debug!("upload skipped: {err}");
            return;
        }
    };
    // Clear so picking the same file again still fires `change`.
    input.set_value("");

    ui.update(|u| u.uploading = true);
    leptos::task::spawn_local(async move {
        let result = read_as_data_url(file).await;
        ui.update(|u| u.uploading = false);
        match result {
            Ok(src) => {
                engine.try_update(|e| e.add_decoration(Content::image(src), None));
                show_status(ui, StatusKind::Info, "Image added to the tree");
            }
            Err(err) => {
                log::warn!("upload failed: {err}");
                show_status(ui, StatusKind::Error, err.to_string());
            }
        }
    });
}
