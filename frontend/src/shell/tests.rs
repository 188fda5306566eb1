use super::*;
use crate::session::{ROLE_KEY, SESSION_ACTIVE_KEY, TOKEN_KEY};
use crate::web::storage::{MemoryStorage, Storage};
use kejaksaan_shared::CaseCategory;
use std::sync::Arc;

fn store() -> (SessionStore, MemoryStorage, MemoryStorage) {
    let persistent = MemoryStorage::new();
    let transient = MemoryStorage::new();
    let store = SessionStore::new(Arc::new(persistent.clone()), Arc::new(transient.clone()));
    (store, persistent, transient)
}

fn signed_in(role: Role) -> SessionStore {
    let (store, _, _) = store();
    login(
        &store,
        &Session {
            token: "tok".to_string(),
            role,
            username: Some("tester".to_string()),
        },
    );
    store
}

// =========================================================
// Login / logout
// =========================================================

#[test]
fn test_login_redirects_to_role_home() {
    let (store, _, transient) = store();
    let t = login(
        &store,
        &Session {
            token: "tok".to_string(),
            role: Role::Admin,
            username: None,
        },
    );
    assert_eq!(t.status, AuthStatus::Authenticated(Role::Admin));
    assert_eq!(t.decision, Decision::Redirect(AppRoute::AdminHome));
    assert_eq!(transient.get(SESSION_ACTIVE_KEY).as_deref(), Some("true"));
}

#[test]
fn test_logout_clears_and_goes_to_login() {
    let store = signed_in(Role::User);
    let t = logout(&store);
    assert_eq!(t.status, AuthStatus::Unauthenticated);
    assert_eq!(t.decision, Decision::Redirect(AppRoute::Login));
    assert!(store.get_session().is_none());
    assert!(!store.is_marked_active());
}

// =========================================================
// visit
// =========================================================

#[test]
fn test_signed_in_users_skip_login_and_root() {
    for (role, home) in [(Role::Admin, AppRoute::AdminHome), (Role::User, AppRoute::UserHome)] {
        let store = signed_in(role);
        for requested in [AppRoute::Login, AppRoute::Root, AppRoute::NotFound] {
            let t = visit(&store, requested);
            assert_eq!(t.status, AuthStatus::Authenticated(role));
            assert_eq!(t.decision, Decision::Redirect(home.clone()));
        }
    }
}

#[test]
fn test_role_mismatch_never_renders_target() {
    let admin = signed_in(Role::Admin);
    assert_eq!(
        visit(&admin, AppRoute::UserHome).decision,
        Decision::Redirect(AppRoute::AdminHome)
    );
    assert_eq!(
        visit(&admin, AppRoute::UserProfile).decision,
        Decision::Redirect(AppRoute::AdminHome)
    );

    let user = signed_in(Role::User);
    assert_eq!(
        visit(&user, AppRoute::AdminUsers).decision,
        Decision::Redirect(AppRoute::UserHome)
    );
}

#[test]
fn test_shared_routes_render_for_both_roles() {
    let route = AppRoute::CaseList {
        category: CaseCategory::Penyidikan,
    };
    for role in [Role::Admin, Role::User] {
        let store = signed_in(role);
        assert_eq!(visit(&store, route.clone()).decision, Decision::Render(route.clone()));
        assert_eq!(
            visit(&store, AppRoute::CaseSchedule).decision,
            Decision::Render(AppRoute::CaseSchedule)
        );
    }
}

#[test]
fn test_stale_session_redirects_guarded_paths_to_login() {
    let (store, persistent, _transient) = store();
    // Token left behind by a closed tab; no sessionActive flag in this one.
    persistent.set(TOKEN_KEY, "stale");
    persistent.set(ROLE_KEY, "user");

    let t = visit(&store, AppRoute::UserHome);
    assert_eq!(t.status, AuthStatus::Unauthenticated);
    assert_eq!(t.decision, Decision::Redirect(AppRoute::Login));
    assert!(persistent.is_empty());
}

#[test]
fn test_login_page_renders_when_signed_out() {
    let (store, _, _) = store();
    let t = visit(&store, AppRoute::Login);
    assert_eq!(t.decision, Decision::Render(AppRoute::Login));

    let t = visit(&store, AppRoute::Root);
    assert_eq!(t.decision, Decision::Redirect(AppRoute::Login));
}

// =========================================================
// follow
// =========================================================

#[test]
fn test_follow_sends_signed_out_users_to_login() {
    assert_eq!(
        follow(AuthStatus::Unauthenticated, &AppRoute::Files),
        Some(AppRoute::Login)
    );
    assert_eq!(
        follow(
            AuthStatus::Unauthenticated,
            &AppRoute::CaseList {
                category: CaseCategory::Penuntutan
            }
        ),
        Some(AppRoute::Login)
    );
    assert_eq!(follow(AuthStatus::Unauthenticated, &AppRoute::Login), None);
}

#[test]
fn test_follow_moves_fresh_login_to_role_home() {
    assert_eq!(
        follow(AuthStatus::Authenticated(Role::Admin), &AppRoute::Login),
        Some(AppRoute::AdminHome)
    );
    assert_eq!(
        follow(AuthStatus::Authenticated(Role::User), &AppRoute::Login),
        Some(AppRoute::UserHome)
    );
}

#[test]
fn test_follow_turns_away_wrong_role() {
    assert_eq!(
        follow(AuthStatus::Authenticated(Role::User), &AppRoute::AdminUsers),
        Some(AppRoute::UserHome)
    );
    assert_eq!(
        follow(AuthStatus::Authenticated(Role::Admin), &AppRoute::UserProfile),
        Some(AppRoute::AdminHome)
    );
}

#[test]
fn test_follow_stays_put_when_allowed() {
    assert_eq!(follow(AuthStatus::Authenticated(Role::User), &AppRoute::Files), None);
    assert_eq!(
        follow(AuthStatus::Authenticated(Role::Admin), &AppRoute::AdminUsers),
        None
    );
    assert_eq!(follow(AuthStatus::Loading, &AppRoute::Files), None);
}

#[test]
fn test_chrome_only_around_signed_in_pages() {
    let user = AuthStatus::Authenticated(Role::User);
    assert!(shows_chrome(user, &AppRoute::Files));
    assert!(shows_chrome(AuthStatus::Authenticated(Role::Admin), &AppRoute::AdminUsers));
    assert!(!shows_chrome(user, &AppRoute::Login));
    assert!(!shows_chrome(user, &AppRoute::NotFound));
    assert!(!shows_chrome(AuthStatus::Unauthenticated, &AppRoute::Files));
    assert!(!shows_chrome(AuthStatus::Loading, &AppRoute::UserHome));
}
