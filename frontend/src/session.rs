//! Session store.
//!
//! Credentials live in the persistent store (`localStorage`); a single
//! `sessionActive` flag lives in the transient, tab-scoped store
//! (`sessionStorage`). Persistent credentials are only trusted while the flag
//! is present, so a fresh tab never inherits a previous tab's login.

use crate::web::storage::{BrowserStorage, Storage};
use kejaksaan_shared::Role;
use std::sync::Arc;

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "userRole";
pub const USERNAME_KEY: &str = "username";
pub const AVATAR_KEY: &str = "userAvatar";
pub const WELCOME_KEY: &str = "hasShownWelcome";
pub const SESSION_ACTIVE_KEY: &str = "sessionActive";

const SESSION_ACTIVE_VALUE: &str = "true";

/// Credentials of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unauthenticated {
    /// No `sessionActive` flag: new tab or explicit logout.
    NoActiveSession,
    /// Flag present but token or role missing.
    Incomplete,
}

/// Outcome of [`SessionStore::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheck {
    Authenticated(Role),
    Unauthenticated(Unauthenticated),
}

#[cfg(test)]
impl SessionCheck {
    pub fn role(&self) -> Option<Role> {
        match self {
            SessionCheck::Authenticated(role) => Some(*role),
            SessionCheck::Unauthenticated(_) => None,
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    persistent: Arc<dyn Storage>,
    transient: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(persistent: Arc<dyn Storage>, transient: Arc<dyn Storage>) -> Self {
        Self {
            persistent,
            transient,
        }
    }

    /// `localStorage` + `sessionStorage`.
    pub fn browser() -> Self {
        Self::new(
            Arc::new(BrowserStorage::Local),
            Arc::new(BrowserStorage::Session),
        )
    }

    /// Validates the stored session. Local reads only.
    ///
    /// Any unauthenticated outcome leaves the persistent store empty. The
    /// transient flag is never written here, so repeating the check on
    /// unchanged storage gives the same answer.
    pub fn check(&self) -> SessionCheck {
        if !self.is_marked_active() {
            self.persistent.clear();
            return SessionCheck::Unauthenticated(Unauthenticated::NoActiveSession);
        }

        match (self.token(), self.role()) {
            (Some(_), Some(role)) => SessionCheck::Authenticated(role),
            _ => {
                self.persistent.clear();
                SessionCheck::Unauthenticated(Unauthenticated::Incomplete)
            }
        }
    }

    /// Stored credentials without validation or side effects.
    pub fn get_session(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            role: self.role()?,
            username: self.username(),
        })
    }

    /// Stores credentials and marks this tab's session active.
    pub fn set_session(&self, session: &Session) {
        self.persistent.set(TOKEN_KEY, &session.token);
        self.persistent.set(ROLE_KEY, session.role.as_str());
        match &session.username {
            Some(name) => self.persistent.set(USERNAME_KEY, name),
            None => self.persistent.delete(USERNAME_KEY),
        };
        self.mark_active();
    }

    /// Wipes the persistent store and the transient flag.
    pub fn clear_session(&self) {
        self.persistent.clear();
        self.transient.delete(SESSION_ACTIVE_KEY);
    }

    pub fn mark_active(&self) {
        self.transient.set(SESSION_ACTIVE_KEY, SESSION_ACTIVE_VALUE);
    }

    pub fn is_marked_active(&self) -> bool {
        self.transient.get(SESSION_ACTIVE_KEY).as_deref() == Some(SESSION_ACTIVE_VALUE)
    }

    pub fn token(&self) -> Option<String> {
        self.persistent.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Unknown role strings count as missing.
    pub fn role(&self) -> Option<Role> {
        self.persistent.get(ROLE_KEY).and_then(|r| Role::parse(&r))
    }

    pub fn username(&self) -> Option<String> {
        self.persistent.get(USERNAME_KEY).filter(|u| !u.is_empty())
    }

    pub fn set_username(&self, username: &str) {
        self.persistent.set(USERNAME_KEY, username);
    }

    pub fn avatar(&self) -> Option<String> {
        self.persistent.get(AVATAR_KEY).filter(|a| !a.is_empty())
    }

    pub fn set_avatar(&self, url: Option<&str>) {
        match url {
            Some(url) => self.persistent.set(AVATAR_KEY, url),
            None => self.persistent.delete(AVATAR_KEY),
        };
    }

    pub fn welcome_shown(&self) -> bool {
        self.persistent.get(WELCOME_KEY).is_some()
    }

    pub fn mark_welcome_shown(&self) {
        self.persistent.set(WELCOME_KEY, "true");
    }
}

#[cfg(test)]
mod tests;
