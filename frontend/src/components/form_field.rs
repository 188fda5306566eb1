//! Labelled form inputs shared by the edit dialogs.

use leptos::prelude::*;

/// Labelled input bound to `value`, with an inline error below it.
#[component]
pub fn FormField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] error: Option<Signal<Option<String>>>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] multiline: bool,
) -> impl IntoView {
    let error = error.unwrap_or_else(|| Signal::derive(|| None));
    let has_error = move || error.get().is_some();

    let input = if multiline {
        view! {
            <textarea
                id=id
                rows="3"
                class=move || {
                    if has_error() { "textarea textarea-bordered textarea-error w-full" } else { "textarea textarea-bordered w-full" }
                }
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                id=id
                type=input_type.unwrap_or("text")
                class=move || {
                    if has_error() { "input input-bordered input-error w-full" } else { "input input-bordered w-full" }
                }
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
            />
        }
        .into_any()
    };

    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label}</span>
            </label>
            {input}
            <Show when=has_error>
                <label class="label">
                    <span class="label-text-alt text-error">{move || error.get().unwrap_or_default()}</span>
                </label>
            </Show>
        </div>
    }
}
