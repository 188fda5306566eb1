//! Shell state machine.
//!
//! `loading -> { authenticated(role), unauthenticated }`. Every path change
//! goes through [`visit`], which re-validates the session and decides whether
//! the requested route renders or is replaced by another one. Nothing here
//! touches the DOM; the router applies the decision.

use crate::session::{Session, SessionCheck, SessionStore};
use crate::web::route::{Access, AppRoute};
use kejaksaan_shared::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Loading,
    Authenticated(Role),
    Unauthenticated,
}

impl AuthStatus {
    pub fn role(&self) -> Option<Role> {
        match self {
            AuthStatus::Authenticated(role) => Some(*role),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated(_))
    }
}

impl From<SessionCheck> for AuthStatus {
    fn from(check: SessionCheck) -> Self {
        match check {
            SessionCheck::Authenticated(role) => AuthStatus::Authenticated(role),
            SessionCheck::Unauthenticated(_) => AuthStatus::Unauthenticated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Render(AppRoute),
    /// Show this route instead, replacing the history entry.
    Redirect(AppRoute),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub status: AuthStatus,
    pub decision: Decision,
}

/// Where `role` may go when asking for `requested`.
pub fn resolve(role: Role, requested: AppRoute) -> Decision {
    if requested.redirects_when_authenticated() || !requested.access().allows(role) {
        return Decision::Redirect(AppRoute::home_for(role));
    }
    Decision::Render(requested)
}

/// Where to move after the status changed under `current` without a
/// navigation, e.g. a 401 from a background request. `None` means stay.
pub fn follow(status: AuthStatus, current: &AppRoute) -> Option<AppRoute> {
    match status {
        AuthStatus::Authenticated(role) => match resolve(role, current.clone()) {
            Decision::Redirect(home) => Some(home),
            Decision::Render(_) => None,
        },
        AuthStatus::Unauthenticated if *current != AppRoute::Login => Some(AppRoute::Login),
        _ => None,
    }
}

/// Header and footer frame signed-in pages only.
pub fn shows_chrome(status: AuthStatus, route: &AppRoute) -> bool {
    status.is_authenticated() && route.access() != Access::Public
}

/// Runs the session check for a navigation to `requested`.
pub fn visit(store: &SessionStore, requested: AppRoute) -> Transition {
    match store.check() {
        SessionCheck::Authenticated(role) => Transition {
            status: AuthStatus::Authenticated(role),
            decision: resolve(role, requested),
        },
        SessionCheck::Unauthenticated(reason) => {
            log::debug!("[Shell] unauthenticated ({reason:?}) at {requested}");
            let decision = if requested == AppRoute::Login {
                Decision::Render(AppRoute::Login)
            } else {
                Decision::Redirect(AppRoute::Login)
            };
            Transition {
                status: AuthStatus::Unauthenticated,
                decision,
            }
        }
    }
}

/// Stores the new session and sends the user to their home.
pub fn login(store: &SessionStore, session: &Session) -> Transition {
    store.set_session(session);
    Transition {
        status: AuthStatus::Authenticated(session.role),
        decision: Decision::Redirect(AppRoute::home_for(session.role)),
    }
}

pub fn logout(store: &SessionStore) -> Transition {
    store.clear_session();
    Transition {
        status: AuthStatus::Unauthenticated,
        decision: Decision::Redirect(AppRoute::Login),
    }
}

#[cfg(test)]
mod tests;
