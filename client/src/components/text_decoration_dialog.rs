//! Modal dialog for composing a styled text decoration.

use leptos::prelude::*;

use canvas::consts::{FONT_SIZE_MAX, FONT_SIZE_MIN, TEXT_MAX_CHARS};
use canvas::doc::{FontFamily, FontSlant, FontWeight};
use canvas::engine::Engine;

use crate::state::text_draft::TextDraft;
use crate::state::ui::UiState;
use crate::util::presets::TEXT_COLORS;

/// Dialog shown while `UiState::text_dialog_open` is set.
#[component]
pub fn TextDecorationDialog() -> impl IntoView {
    let engine = expect_context::<RwSignal<Engine>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let draft = RwSignal::new(TextDraft::default());

    let close = move || ui.update(|u| u.text_dialog_open = false);

    let submit = move || {
        let content = draft.with_untracked(TextDraft::to_content);
        match content {
            Ok(content) => {
                engine.try_update(|e| e.add_decoration(content, None));
                close();
            }
            Err(err) => log::warn!("text decoration rejected: {err}"),
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
        "Escape" => {
            ev.prevent_default();
            close();
        }
        "Enter" if draft.with_untracked(TextDraft::can_submit) => {
            ev.prevent_default();
            submit();
        }
        _ => {}
    };

    let preview_font = move || draft.with(|d| d.style.css_font());
    let preview_color = move || draft.with(|d| d.style.color.clone());
    let preview_text = move || {
        draft.with(|d| if d.text.is_empty() { "Preview".to_owned() } else { d.text.clone() })
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| close()>
            <div
                class="dialog dialog--text-decoration"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
            >
                <h3 class="dialog__title">"Add text"</h3>

                <label class="dialog__label">
                    "Text"
                    <input
                        class="dialog__input"
                        type="text"
                        maxlength=TEXT_MAX_CHARS.to_string()
                        placeholder="Merry Christmas"
                        prop:value=move || draft.with(|d| d.text.clone())
                        on:input=move |ev| draft.update(|d| d.set_text(&event_target_value(&ev)))
                        autofocus=true
                    />
                    <span class="dialog__hint">
                        {move || format!("{} characters left", draft.with(TextDraft::remaining_chars))}
                    </span>
                </label>

                <label class="dialog__label">
                    "Font"
                    <select
                        class="dialog__select"
                        prop:value=move || draft.with(|d| d.style.font_family.css_name())
                        on:change=move |ev| draft.update(|d| d.set_font_family(&event_target_value(&ev)))
                    >
                        {FontFamily::ALL
                            .into_iter()
                            .map(|f| view! { <option value=f.css_name()>{f.css_name()}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </label>

                <div class="dialog__row">
                    <label class="dialog__label">
                        "Weight"
                        <select
                            class="dialog__select"
                            prop:value=move || draft.with(|d| d.style.weight.css())
                            on:change=move |ev| draft.update(|d| d.set_weight(&event_target_value(&ev)))
                        >
                            {FontWeight::ALL
                                .into_iter()
                                .map(|w| view! { <option value=w.css()>{w.css()}</option> })
                                .collect::<Vec<_>>()}
                        </select>
                    </label>
                    <label class="dialog__label">
                        "Style"
                        <select
                            class="dialog__select"
                            prop:value=move || draft.with(|d| d.style.slant.css())
                            on:change=move |ev| draft.update(|d| d.set_slant(&event_target_value(&ev)))
                        >
                            {FontSlant::ALL
                                .into_iter()
                                .map(|s| view! { <option value=s.css()>{s.css()}</option> })
                                .collect::<Vec<_>>()}
                        </select>
                    </label>
                </div>

                <label class="dialog__label">
                    {move || format!("Size {}px", draft.with(|d| d.style.font_size))}
                    <input
                        class="dialog__slider"
                        type="range"
                        min=FONT_SIZE_MIN.to_string()
                        max=FONT_SIZE_MAX.to_string()
                        step="1"
                        prop:value=move || draft.with(|d| d.style.font_size.to_string())
                        on:input=move |ev| {
                            if let Ok(size) = event_target_value(&ev).parse::<f64>() {
                                draft.update(|d| d.set_font_size(size));
                            }
                        }
                    />
                </label>

                <div class="dialog__label">
                    "Color"
                    <div class="dialog__swatches">
                        {TEXT_COLORS
                            .into_iter()
                            .map(|hex| {
                                let selected = move || draft.with(|d| d.style.color.eq_ignore_ascii_case(hex));
                                view! {
                                    <button
                                        class=move || {
                                            if selected() { "dialog__swatch dialog__swatch--selected" } else { "dialog__swatch" }
                                        }
                                        style:background=hex
                                        title=hex
                                        aria-label=hex
                                        on:click=move |_| draft.update(|d| d.set_color(hex))
                                    ></button>
                                }
                            })
                            .collect::<Vec<_>>()}
                        <input
                            class="dialog__color"
                            type="color"
                            prop:value=move || draft.with(|d| d.style.color.clone())
                            on:input=move |ev| draft.update(|d| d.set_color(&event_target_value(&ev)))
                        />
                    </div>
                </div>

                <div class="dialog__preview" style:font=preview_font style:color=preview_color>
                    {preview_text}
                </div>

                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| close()>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--primary"
                        disabled=move || !draft.with(TextDraft::can_submit)
                        on:click=move |_| submit()
                    >
                        "Add"
                    </button>
                </div>
            </div>
        </div>
    }
}
