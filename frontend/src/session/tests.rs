use super::*;
use crate::web::storage::MemoryStorage;

// =========================================================
// Helpers
// =========================================================

fn stores() -> (SessionStore, MemoryStorage, MemoryStorage) {
    let persistent = MemoryStorage::new();
    let transient = MemoryStorage::new();
    let store = SessionStore::new(Arc::new(persistent.clone()), Arc::new(transient.clone()));
    (store, persistent, transient)
}

fn seed(
    persistent: &MemoryStorage,
    transient: &MemoryStorage,
    active: bool,
    token: bool,
    role: bool,
) {
    if active {
        transient.set(SESSION_ACTIVE_KEY, "true");
    }
    if token {
        persistent.set(TOKEN_KEY, "tok-123");
    }
    if role {
        persistent.set(ROLE_KEY, "admin");
    }
}

// =========================================================
// check
// =========================================================

#[test]
fn test_check_outcome_table() {
    for active in [false, true] {
        for token in [false, true] {
            for role in [false, true] {
                let (store, persistent, transient) = stores();
                seed(&persistent, &transient, active, token, role);

                let outcome = store.check();
                let expected = match (active, token && role) {
                    (false, _) => SessionCheck::Unauthenticated(Unauthenticated::NoActiveSession),
                    (true, true) => SessionCheck::Authenticated(Role::Admin),
                    (true, false) => SessionCheck::Unauthenticated(Unauthenticated::Incomplete),
                };
                assert_eq!(outcome, expected, "active={active} token={token} role={role}");

                if outcome.role().is_none() {
                    assert!(
                        persistent.is_empty(),
                        "persistent store must be empty after {outcome:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_stale_token_from_previous_tab_is_wiped() {
    let (store, persistent, _transient) = stores();
    persistent.set(TOKEN_KEY, "old");
    persistent.set(ROLE_KEY, "user");
    persistent.set(USERNAME_KEY, "budi");
    persistent.set(AVATAR_KEY, "https://cdn/a.png");

    assert_eq!(
        store.check(),
        SessionCheck::Unauthenticated(Unauthenticated::NoActiveSession)
    );
    assert!(persistent.is_empty());
    assert!(store.get_session().is_none());
}

#[test]
fn test_check_is_idempotent() {
    let (store, persistent, transient) = stores();
    seed(&persistent, &transient, true, true, true);
    assert_eq!(store.check(), store.check());

    let (store, persistent, transient) = stores();
    seed(&persistent, &transient, true, true, false);
    let first = store.check();
    assert_eq!(first, store.check());
    assert!(store.is_marked_active());
}

#[test]
fn test_unknown_role_counts_as_missing() {
    let (store, persistent, transient) = stores();
    seed(&persistent, &transient, true, true, false);
    persistent.set(ROLE_KEY, "superuser");
    assert_eq!(
        store.check(),
        SessionCheck::Unauthenticated(Unauthenticated::Incomplete)
    );
}

// =========================================================
// set / get / clear
// =========================================================

#[test]
fn test_set_session_marks_tab_active() {
    let (store, persistent, transient) = stores();
    let session = Session {
        token: "abc".to_string(),
        role: Role::User,
        username: Some("budi".to_string()),
    };

    store.set_session(&session);

    assert_eq!(transient.get(SESSION_ACTIVE_KEY).as_deref(), Some("true"));
    assert_eq!(persistent.get(ROLE_KEY).as_deref(), Some("user"));
    assert_eq!(store.get_session(), Some(session));
    assert_eq!(store.check(), SessionCheck::Authenticated(Role::User));
}

#[test]
fn test_clear_session_removes_everything() {
    let (store, persistent, transient) = stores();
    store.set_session(&Session {
        token: "abc".to_string(),
        role: Role::Admin,
        username: None,
    });
    store.set_avatar(Some("https://cdn/a.png"));

    store.clear_session();

    assert!(persistent.is_empty());
    assert!(transient.get(SESSION_ACTIVE_KEY).is_none());
    assert!(store.avatar().is_none());
}

#[test]
fn test_avatar_mirror() {
    let (store, _persistent, _transient) = stores();
    store.set_avatar(Some("https://cdn/a.png"));
    assert_eq!(store.avatar().as_deref(), Some("https://cdn/a.png"));
    store.set_avatar(None);
    assert!(store.avatar().is_none());
}
