//! Case form inputs.

use leptos::prelude::*;

use super::form_state::CaseFormState;
use crate::components::form_field::FormField;

/// `full` adds the witness and prosecutor fields shown when editing.
#[component]
pub fn CaseFields(state: CaseFormState, #[prop(optional)] full: bool) -> impl IntoView {
    let title_error = Signal::derive(move || state.error("title"));
    let date_error = Signal::derive(move || state.error("date"));

    view! {
        <FormField id="case-title" label="Judul Kasus" value=state.title error=title_error />
        <FormField id="case-date" label="Tanggal" value=state.date error=date_error input_type="date" />
        <FormField id="case-description" label="Deskripsi" value=state.description multiline=true />
        <FormField id="case-parties" label="Pihak Terkait" value=state.parties />
        {full.then(|| view! {
            <FormField id="case-witnesses" label="Saksi" value=state.witnesses />
            <FormField id="case-prosecutor" label="Jaksa" value=state.prosecutor />
        })}
    }
}
