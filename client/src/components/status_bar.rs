//! Bottom status bar showing session counts and transient messages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Upload and export finish asynchronously; their outcome lands here as a
//! short-lived message next to low-frequency session telemetry.

#[cfg(test)]
#[path = "status_bar_test.rs"]
mod status_bar_test;

use leptos::prelude::*;

use canvas::engine::Engine;
use canvas::tree::LightPalette;

use crate::state::ui::{StatusKind, UiState};

/// Status bar under the tree.
#[component]
pub fn StatusBar() -> impl IntoView {
    let engine = expect_context::<RwSignal<Engine>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let count = move || engine.with(|e| e.decorations().len());
    let palette = move || engine.with(|e| e.scene.palette);
    let playing = move || engine.with(|e| e.scene.playing);
    let lit = move || engine.with(|e| e.scene.lit.len());
    let message = move || ui.with(|u| u.status.clone());

    view! {
        <div class="status-bar">
            <div class="status-bar__section">
                <span class="status-bar__item">{move || format_count(count())}</span>
                <span class="status-bar__divider"></span>
                <span class="status-bar__item">{move || format_lights(palette(), lit())}</span>
                <span class="status-bar__divider"></span>
                <span class="status-bar__item">{move || if playing() { "ANIMATING" } else { "PAUSED" }}</span>
            </div>
            <div class="status-bar__section">
                {move || {
                    message()
                        .map(|m| {
                            let class = match m.kind {
                                StatusKind::Info => "status-bar__message",
                                StatusKind::Error => "status-bar__message status-bar__message--error",
                            };
                            view! { <span class=class>{m.text}</span> }
                        })
                }}
            </div>
        </div>
    }
}

/// Post a status message and clear it after [`crate::state::ui::STATUS_TTL_MS`].
#[cfg(feature = "csr")]
pub fn show_status(ui: RwSignal<UiState>, kind: StatusKind, text: impl Into<String>) {
    let Some(seq) = ui.try_update(|u| u.post_status(kind, text)) else {
        return;
    };
    gloo_timers::callback::Timeout::new(crate::state::ui::STATUS_TTL_MS, move || {
        ui.try_update(|u| u.expire_status(seq));
    })
    .forget();
}

fn format_count(count: usize) -> String {
    match count {
        1 => "1 decoration".to_owned(),
        n => format!("{n} decorations"),
    }
}

fn format_lights(palette: LightPalette, lit: usize) -> String {
    if lit == 0 {
        format!("{} lights", palette.label())
    } else {
        format!("{} lights, {lit} glowing", palette.label())
    }
}
