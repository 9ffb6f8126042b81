//! Floating card for rotating, scaling, and deleting the clicked decoration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The engine opens the editor after a click settles; this card reads the
//! edited decoration from the engine signal and writes back through the
//! engine's editor operations, which clamp and normalize every value.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use canvas::consts::{QUICK_GROW_FACTOR, QUICK_SHRINK_FACTOR, SCALE_MAX, SCALE_MIN};
use canvas::doc::{Content, DecorationId, StoreError};
use canvas::engine::{Action, Engine};

use crate::util::editor_layout::{EDITOR_MIN_PX, editor_anchor, format_rotation, format_scale, preview_transform};

/// Apply an editor operation to the decoration being edited.
fn edit_target(
    engine: RwSignal<Engine>,
    op: impl FnOnce(&mut Engine, &DecorationId) -> Result<Vec<Action>, StoreError>,
) {
    let Some(id) = engine.with_untracked(|e| e.ui.editing) else {
        return;
    };
    if let Some(Err(err)) = engine.try_update(|e| op(e, &id)) {
        log::warn!("editor change rejected for {id}: {err}");
    }
}

fn parse_input(ev: &leptos::ev::Event) -> Option<f64> {
    event_target_value(ev).parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Editor card, shown while a decoration is being edited.
#[component]
pub fn DecorationEditor() -> impl IntoView {
    let engine = expect_context::<RwSignal<Engine>>();
    let current = Memo::new(move |_| engine.with(|e| e.editing().cloned()));
    let is_open = Memo::new(move |_| current.with(Option::is_some));

    let rotation = move || current.with(|d| d.as_ref().map_or(0.0, |d| d.rotation));
    let scale = move || current.with(|d| d.as_ref().map_or(1.0, |d| d.scale));
    let anchor = move || {
        current.with(|d| d.as_ref().map_or((EDITOR_MIN_PX, EDITOR_MIN_PX), editor_anchor))
    };
    let rotate_step = move || engine.with(|e| e.config.rotate_step_deg);

    let preview = move || {
        current.get().map(|d| {
            let transform = preview_transform(&d);
            match d.content {
                Content::Emoji { glyph } => view! {
                    <span class="decoration-editor__glyph" style:transform=transform>{glyph}</span>
                }
                .into_any(),
                Content::Image { src } => view! {
                    <img
                        class="decoration-editor__image"
                        style:transform=transform
                        src=src
                        alt="decoration"
                        draggable="false"
                    />
                }
                .into_any(),
                Content::Text { text, style } => view! {
                    <span
                        class="decoration-editor__text"
                        style:transform=transform
                        style:font=style.css_font()
                        style:color=style.color
                    >
                        {text}
                    </span>
                }
                .into_any(),
            }
        })
    };

    let on_close = move |_| {
        engine.try_update(Engine::close_editor);
    };
    let on_rotation = move |ev: leptos::ev::Event| {
        if let Some(deg) = parse_input(&ev) {
            edit_target(engine, |e, id| e.set_rotation(id, deg));
        }
    };
    let on_rotation_reset = move |_| edit_target(engine, |e, id| e.set_rotation(id, 0.0));
    let on_rotate_step = move |_| {
        let step = rotate_step();
        edit_target(engine, |e, id| e.rotate_by(id, step));
    };
    let on_scale = move |ev: leptos::ev::Event| {
        if let Some(value) = parse_input(&ev) {
            edit_target(engine, |e, id| e.set_scale(id, value));
        }
    };
    let on_shrink = move |_| edit_target(engine, |e, id| e.scale_times(id, QUICK_SHRINK_FACTOR));
    let on_grow = move |_| edit_target(engine, |e, id| e.scale_times(id, QUICK_GROW_FACTOR));
    let on_scale_reset = move |_| edit_target(engine, |e, id| e.set_scale(id, 1.0));
    let on_delete = move |_| {
        let Some(id) = engine.with_untracked(|e| e.ui.editing) else {
            return;
        };
        engine.try_update(|e| e.remove(&id));
    };

    view! {
        <Show when=move || is_open.get()>
            <div
                class="decoration-editor"
                style:left=move || format!("{}px", anchor().0)
                style:top=move || format!("{}px", anchor().1)
            >
                <div class="decoration-editor__header">
                    <h3 class="decoration-editor__title">"Edit decoration"</h3>
                    <button class="btn btn--ghost" title="Close" on:click=on_close>
                        "×"
                    </button>
                </div>

                <div class="decoration-editor__preview">{preview}</div>

                <div class="decoration-editor__group">
                    <div class="decoration-editor__row">
                        <label class="decoration-editor__label" for="decoration-rotation">
                            "Rotation"
                        </label>
                        <span class="decoration-editor__value">{move || format_rotation(rotation())}</span>
                    </div>
                    <input
                        id="decoration-rotation"
                        class="decoration-editor__slider"
                        type="range"
                        min="0"
                        max="360"
                        step="1"
                        prop:value=move || rotation().to_string()
                        on:input=on_rotation
                    />
                    <div class="decoration-editor__buttons">
                        <button class="btn" on:click=on_rotation_reset>
                            "Reset"
                        </button>
                        <button class="btn" on:click=on_rotate_step>
                            {move || format!("+{}°", rotate_step())}
                        </button>
                    </div>
                </div>

                <div class="decoration-editor__group">
                    <div class="decoration-editor__row">
                        <label class="decoration-editor__label" for="decoration-scale">
                            "Scale"
                        </label>
                        <span class="decoration-editor__value">{move || format_scale(scale())}</span>
                    </div>
                    <input
                        id="decoration-scale"
                        class="decoration-editor__slider"
                        type="range"
                        min=SCALE_MIN.to_string()
                        max=SCALE_MAX.to_string()
                        step="0.1"
                        prop:value=move || scale().to_string()
                        on:input=on_scale
                    />
                    <div class="decoration-editor__buttons">
                        <button class="btn" on:click=on_shrink>
                            "Shrink"
                        </button>
                        <button class="btn" on:click=on_grow>
                            "Grow"
                        </button>
                        <button class="btn" on:click=on_scale_reset>
                            "Reset"
                        </button>
                    </div>
                </div>

                <div class="decoration-editor__footer">
                    <button class="btn btn--danger" on:click=on_delete>
                        "Delete decoration"
                    </button>
                </div>
            </div>
        </Show>
    }
}
