//! Case form state.
//!
//! One `RwSignal` per field so the struct stays `Copy` and can be handed to
//! the field components as a prop.

use kejaksaan_shared::validation::{FieldErrors, validate_case_draft};
use kejaksaan_shared::{CaseDraft, CaseRecord};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CaseFormState {
    pub title: RwSignal<String>,
    pub date: RwSignal<String>,
    pub description: RwSignal<String>,
    pub parties: RwSignal<String>,
    pub witnesses: RwSignal<String>,
    pub prosecutor: RwSignal<String>,
    /// Slug the case belongs to; not editable in the form.
    pub category: RwSignal<String>,
    pub errors: RwSignal<FieldErrors>,
}

impl CaseFormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            date: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            parties: RwSignal::new(String::new()),
            witnesses: RwSignal::new(String::new()),
            prosecutor: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            errors: RwSignal::new(FieldErrors::new()),
        }
    }

    pub fn reset(&self) {
        self.fill(CaseDraft::default());
    }

    /// Prefills the form for editing `record`.
    pub fn load(&self, record: &CaseRecord) {
        self.fill(CaseDraft::from_record(record));
    }

    fn fill(&self, draft: CaseDraft) {
        self.title.set(draft.title);
        self.date.set(draft.date);
        self.description.set(draft.description);
        self.parties.set(draft.parties);
        self.witnesses.set(draft.witnesses);
        self.prosecutor.set(draft.prosecutor);
        self.category.set(draft.category);
        self.errors.set(FieldErrors::new());
    }

    pub fn to_draft(&self) -> CaseDraft {
        CaseDraft {
            title: self.title.get_untracked().trim().to_string(),
            date: self.date.get_untracked(),
            description: self.description.get_untracked(),
            parties: self.parties.get_untracked(),
            witnesses: self.witnesses.get_untracked(),
            prosecutor: self.prosecutor.get_untracked(),
            category: self.category.get_untracked(),
        }
    }

    /// The draft, or `None` after marking the failing fields.
    pub fn validated(&self) -> Option<CaseDraft> {
        let draft = self.to_draft();
        match validate_case_draft(&draft) {
            Ok(()) => {
                self.errors.set(FieldErrors::new());
                Some(draft)
            }
            Err(errors) => {
                self.errors.set(errors);
                None
            }
        }
    }

    pub fn error(&self, field: &'static str) -> Option<String> {
        self.errors.with(|e| e.get(field).map(str::to_string))
    }
}

impl Default for CaseFormState {
    fn default() -> Self {
        Self::new()
    }
}
