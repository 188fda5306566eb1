//! Create/edit dialog for a case.

mod case_fields;
mod form_state;

pub use form_state::CaseFormState;

use crate::components::modal::Modal;
use case_fields::CaseFields;
use kejaksaan_shared::CaseDraft;
use leptos::prelude::*;

/// Submits only drafts that pass validation; failing fields are marked
/// inline and the dialog stays open. The caller closes it on success.
#[component]
pub fn CaseDialog(
    open: RwSignal<bool>,
    title: &'static str,
    state: CaseFormState,
    #[prop(into)] saving: Signal<bool>,
    #[prop(into)] on_submit: Callback<CaseDraft>,
    #[prop(optional)] full: bool,
) -> impl IntoView {
    let submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(draft) = state.validated() {
            on_submit.run(draft);
        }
    };

    view! {
        <Modal open=open title=title>
            <form on:submit=submit class="space-y-2" novalidate>
                <CaseFields state=state full=full />
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                        "Batal"
                    </button>
                    <button type="submit" disabled=move || saving.get() class="btn btn-primary">
                        {move || if saving.get() {
                            view! { <span class="loading loading-spinner"></span> "Menyimpan..." }.into_any()
                        } else {
                            "Simpan".into_any()
                        }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
