//! Light palette, snow, and animation controls.

use leptos::prelude::*;

use canvas::engine::Engine;
use canvas::tree::LightPalette;

/// Buttons for the scene's light palette and ambient animation.
#[component]
pub fn ControlPanel() -> impl IntoView {
    let engine = expect_context::<RwSignal<Engine>>();

    let palette = move || engine.with(|e| e.scene.palette);
    let show_snow = move || engine.with(|e| e.scene.show_snow);
    let playing = move || engine.with(|e| e.scene.playing);

    view! {
        <div class="control-panel">
            <h2 class="control-panel__title">"Lights"</h2>
            <div class="control-panel__palettes">
                {LightPalette::ALL
                    .into_iter()
                    .map(|p| {
                        let active = move || palette() == p;
                        view! {
                            <button
                                class=move || if active() { "btn btn--active" } else { "btn" }
                                aria-pressed=move || active().to_string()
                                on:click=move |_| engine.update(|e| e.scene.palette = p)
                            >
                                {p.label()}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
            <div class="control-panel__toggles">
                <button class="btn" on:click=move |_| engine.update(|e| e.scene.show_snow = !e.scene.show_snow)>
                    {move || if show_snow() { "Stop snow" } else { "Let it snow" }}
                </button>
                <button class="btn" on:click=move |_| engine.update(|e| e.scene.playing = !e.scene.playing)>
                    {move || if playing() { "Pause" } else { "Play" }}
                </button>
            </div>
        </div>
    }
}
