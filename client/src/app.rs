//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};

use canvas::config::EngineConfig;
use canvas::consts::{SUBTITLE_TEXT, TITLE_TEXT};
use canvas::engine::Engine;

use crate::components::control_panel::ControlPanel;
use crate::components::decoration_panel::DecorationPanel;
use crate::components::settings_panel::SettingsPanel;
use crate::components::status_bar::StatusBar;
use crate::components::text_decoration_dialog::TextDecorationDialog;
use crate::components::tree_host::TreeHost;
use crate::state::ui::UiState;

/// Engine configuration from the page URL, or defaults when absent or invalid.
fn load_config() -> EngineConfig {
    #[cfg(feature = "csr")]
    {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        match crate::util::query::config_from_query(&search) {
            Ok(config) => return config,
            Err(err) => log::warn!("ignoring URL configuration: {err}"),
        }
    }
    EngineConfig::default()
}

/// Root application component.
///
/// Provides the engine and UI state contexts and lays out the page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let engine = RwSignal::new(Engine::with_config(load_config()));
    let ui = RwSignal::new(UiState::default());
    provide_context(engine);
    provide_context(ui);

    let show_title = move || engine.with(|e| e.scene.show_title);
    let show_subtitle = move || engine.with(|e| e.scene.show_subtitle);
    let dialog_open = move || ui.with(|u| u.text_dialog_open);

    let on_reset = move |_| {
        engine.update(|e| {
            e.reset();
        });
    };

    view! {
        <Stylesheet id="leptos" href="/style/main.css"/>
        <Title text=TITLE_TEXT/>

        <div class="app">
            <header class="app__header">
                <Show when=show_title>
                    <h1 class="app__title">{TITLE_TEXT}</h1>
                </Show>
                <Show when=show_subtitle>
                    <p class="app__subtitle">{SUBTITLE_TEXT}</p>
                </Show>
            </header>

            <main class="app__main">
                <section class="app__stage">
                    <TreeHost/>
                    <StatusBar/>
                </section>
                <aside class="app__sidebar">
                    <DecorationPanel/>
                    <ControlPanel/>
                    <SettingsPanel/>
                    <button class="btn btn--danger app__reset" on:click=on_reset>
                        "Start over"
                    </button>
                </aside>
            </main>

            <Show when=dialog_open>
                <TextDecorationDialog/>
            </Show>
        </div>
    }
}
