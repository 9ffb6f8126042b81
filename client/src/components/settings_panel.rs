//! Visibility switches for scene elements.

#[cfg(test)]
#[path = "settings_panel_test.rs"]
mod settings_panel_test;

use leptos::prelude::*;

use canvas::engine::Engine;
use canvas::tree::Scene;

#[derive(Clone, Copy)]
enum SceneFlag {
    Snow,
    Lights,
    Title,
    Subtitle,
}

impl SceneFlag {
    const ALL: [SceneFlag; 4] = [Self::Snow, Self::Lights, Self::Title, Self::Subtitle];

    fn label(self) -> &'static str {
        match self {
            Self::Snow => "Snow",
            Self::Lights => "Lights",
            Self::Title => "Title",
            Self::Subtitle => "Subtitle",
        }
    }

    fn field(self, scene: &mut Scene) -> &mut bool {
        match self {
            Self::Snow => &mut scene.show_snow,
            Self::Lights => &mut scene.show_lights,
            Self::Title => &mut scene.show_title,
            Self::Subtitle => &mut scene.show_subtitle,
        }
    }

    fn get(self, scene: &Scene) -> bool {
        match self {
            Self::Snow => scene.show_snow,
            Self::Lights => scene.show_lights,
            Self::Title => scene.show_title,
            Self::Subtitle => scene.show_subtitle,
        }
    }
}

/// Checkboxes for snow, lights, title, and subtitle.
#[component]
pub fn SettingsPanel() -> impl IntoView {
    let engine = expect_context::<RwSignal<Engine>>();

    view! {
        <div class="settings-panel">
            <h2 class="settings-panel__title">"Settings"</h2>
            {SceneFlag::ALL
                .into_iter()
                .map(|flag| {
                    view! {
                        <label class="settings-panel__switch">
                            <input
                                type="checkbox"
                                prop:checked=move || engine.with(|e| flag.get(&e.scene))
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    engine.update(|e| *flag.field(&mut e.scene) = on);
                                }
                            />
                            <span>{flag.label()}</span>
                        </label>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
