//! Toasts.
//!
//! Views report outcomes through [`Notifier`] instead of keeping their own
//! message signals; `ToastHost` renders them at the top right and hides
//! each one after [`TOAST_TIMEOUT`].

use crate::api::ApiError;
use crate::config::TOAST_TIMEOUT;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

impl Tone {
    fn alert_class(&self) -> &'static str {
        match self {
            Tone::Success => "alert alert-success shadow-lg",
            Tone::Error => "alert alert-error shadow-lg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    id: u64,
    tone: Tone,
    text: String,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    notices: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u64>,
}

impl Notifier {
    fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(Tone::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(Tone::Error, text.into());
    }

    /// Server message when there is one, `fallback` otherwise.
    pub fn api_error(&self, error: &ApiError, fallback: &str) {
        log::warn!("[Notify] {}: {}", error.error_code(), error);
        self.error(error.user_message(fallback));
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }

    fn push(&self, tone: Tone, text: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.notices.update(|list| list.push(Notice { id, tone, text }));

        let notifier = *self;
        set_timeout(move || notifier.dismiss(id), TOAST_TIMEOUT);
    }
}

pub fn provide_notifier() -> Notifier {
    let notifier = Notifier::new();
    provide_context(notifier);
    notifier
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || notifier.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.tone.alert_class() on:click=move |_| notifier.dismiss(id)>
                            <span>{notice.text}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
