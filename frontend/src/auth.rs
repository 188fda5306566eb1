//! Auth context.
//!
//! Reactive face of the shell state machine. The router asks it to `visit`
//! every route; views call `login`/`sign_out`. The API client's 401 hook
//! writes straight into the status signal, which the router watches.

use crate::api::Api;
use crate::config::AppConfig;
use crate::session::{Session, SessionStore};
use crate::shell::{self, AuthStatus, Decision, Transition};
use crate::web::route::AppRoute;
use kejaksaan_shared::Role;
use leptos::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub status: AuthStatus,
    /// Display name from the persistent store.
    pub username: Option<String>,
}

impl AuthState {
    /// State after a transition. The stored display name only shows while
    /// signed in.
    fn settled(status: AuthStatus, stored: Option<Session>) -> Self {
        Self {
            status,
            username: stored
                .filter(|_| status.is_authenticated())
                .and_then(|session| session.username),
        }
    }
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Current status and display name.
    pub state: ReadSignal<AuthState>,
    /// Also written by the API client's 401 hook.
    pub set_state: WriteSignal<AuthState>,
    /// Browser-backed credentials; the source of truth on every visit.
    store: StoredValue<SessionStore>,
    /// Client sharing `store`, so requests carry the current token.
    api: StoredValue<Api>,
}

impl AuthContext {
    pub fn new(config: &AppConfig, store: SessionStore) -> Self {
        let (state, set_state) = signal(AuthState::default());

        let api = Api::from_config(config, store.clone()).on_unauthorized(move || {
            set_state.update(|s| {
                s.status = AuthStatus::Unauthenticated;
                s.username = None;
            });
        });

        Self {
            state,
            set_state,
            store: StoredValue::new(store),
            api: StoredValue::new(api),
        }
    }

    /// Cheap clone of the shared client.
    pub fn api(&self) -> Api {
        self.api.get_value()
    }

    pub fn store(&self) -> SessionStore {
        self.store.get_value()
    }

    /// Reactive status; the router redirects whenever it changes.
    pub fn status(&self) -> Signal<AuthStatus> {
        let state = self.state;
        Signal::derive(move || state.get().status)
    }

    pub fn role(&self) -> Option<Role> {
        self.state.with(|s| s.status.role())
    }

    pub fn username(&self) -> Option<String> {
        self.state.with(|s| s.username.clone())
    }

    /// Runs the session check for `requested` and records the outcome.
    pub fn visit(&self, requested: AppRoute) -> Decision {
        let transition = self.store.with_value(|store| shell::visit(store, requested));
        self.apply(transition)
    }

    /// Stores `session` and marks the tab signed in. The router follows the
    /// status change to the role's home.
    pub fn login(&self, session: &Session) {
        let transition = self.store.with_value(|store| shell::login(store, session));
        self.apply(transition);
    }

    /// Ends the local session. The router follows the status change.
    pub fn logout(&self) {
        let transition = self.store.with_value(shell::logout);
        self.apply(transition);
    }

    /// Renames the signed-in user locally; an empty name clears it.
    pub fn set_username(&self, username: &str) {
        self.store.with_value(|store| store.set_username(username));
        let username = Some(username.to_string()).filter(|u| !u.is_empty());
        self.set_state.update(|s| s.username = username);
    }

    fn apply(&self, transition: Transition) -> Decision {
        let stored = self.store.with_value(SessionStore::get_session);
        let next = AuthState::settled(transition.status, stored);
        self.set_state.maybe_update(|s| {
            if *s == next {
                false
            } else {
                *s = next;
                true
            }
        });
        transition.decision
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Tells the backend, then always ends the local session.
pub async fn sign_out(auth: AuthContext) {
    if let Err(e) = auth.api().logout().await {
        log::warn!("[Auth] backend logout failed: {e}");
    }
    auth.logout();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(username: Option<&str>) -> Session {
        Session {
            token: "tok".to_string(),
            role: Role::User,
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn settled_state_shows_name_only_when_signed_in() {
        let signed_in = AuthState::settled(
            AuthStatus::Authenticated(Role::User),
            Some(session(Some("budi"))),
        );
        assert_eq!(signed_in.username.as_deref(), Some("budi"));

        let signed_out =
            AuthState::settled(AuthStatus::Unauthenticated, Some(session(Some("budi"))));
        assert_eq!(signed_out.status, AuthStatus::Unauthenticated);
        assert!(signed_out.username.is_none());
    }

    #[test]
    fn settled_state_without_stored_session_has_no_name() {
        let state = AuthState::settled(AuthStatus::Authenticated(Role::Admin), None);
        assert_eq!(state.status, AuthStatus::Authenticated(Role::Admin));
        assert!(state.username.is_none());

        let state = AuthState::settled(AuthStatus::Authenticated(Role::User), Some(session(None)));
        assert!(state.username.is_none());
    }
}
