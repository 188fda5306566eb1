//! Avatar shared between the header and the profile pages.
//!
//! The URL is mirrored into the persistent store so a reload shows the same
//! picture before the profile is fetched again.

use crate::session::SessionStore;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct AvatarContext {
    url: RwSignal<Option<String>>,
    store: StoredValue<SessionStore>,
}

impl AvatarContext {
    pub fn new(store: SessionStore) -> Self {
        Self {
            url: RwSignal::new(store.avatar()),
            store: StoredValue::new(store),
        }
    }

    pub fn url(&self) -> Option<String> {
        self.url.get()
    }

    pub fn is_empty(&self) -> bool {
        self.url.with_untracked(Option::is_none)
    }

    /// Blank URLs clear the avatar.
    pub fn set(&self, url: Option<String>) {
        let url = url.filter(|u| !u.trim().is_empty());
        self.store.with_value(|store| store.set_avatar(url.as_deref()));
        self.url.set(url);
    }

    pub fn clear(&self) {
        self.set(None);
    }
}

pub fn provide_avatar(store: SessionStore) -> AvatarContext {
    let ctx = AvatarContext::new(store);
    provide_context(ctx);
    ctx
}

pub fn use_avatar() -> AvatarContext {
    use_context::<AvatarContext>().expect("AvatarContext should be provided")
}
