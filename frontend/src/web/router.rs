//! Router service.
//!
//! Owns `window.history`. Every navigation (link, back/forward, the initial
//! load) runs through [`AuthContext::visit`], which re-checks the session and
//! either renders the requested route or substitutes another one. Substitutes
//! always replace the history entry so Back cannot return to a page the user
//! was turned away from.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;
use crate::auth::AuthContext;
use crate::shell::{self, Decision};

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// History-backed router. `Copy`, so handlers capture it freely.
#[derive(Clone, Copy)]
pub struct RouterService {
    /// Route being rendered; never one the session check turned away.
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// Consulted on every navigation.
    auth: AuthContext,
}

impl RouterService {
    fn new(auth: AuthContext) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        Self {
            current_route,
            set_route,
            auth,
        }
    }

    /// Reactive current route.
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Navigates to a raw path. Unknown paths end at the role's home.
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// Navigates to `route`, pushing a history entry if it renders.
    pub fn go(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// Like [`go`](Self::go) but replaces the current history entry.
    pub fn replace(&self, route: AppRoute) {
        self.navigate_to_route(route, false);
    }

    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        match self.auth.visit(target_route) {
            Decision::Render(route) => {
                let path = route.to_path();
                if use_push && route != self.current_route.get_untracked() {
                    push_history_state(&path);
                } else {
                    replace_history_state(&path);
                }
                self.set_route.set(route);
            }
            Decision::Redirect(route) => {
                log::info!("[Router] redirecting to {route}");
                replace_history_state(&route.to_path());
                self.set_route.set(route);
            }
        }
    }

    /// Back/forward buttons.
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            log::debug!("[Router] popstate to {target_route}");
            router.navigate_to_route(target_route, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Lives as long as the page.
        closure.forget();
    }

    /// Follows status changes made outside a navigation: login, logout and
    /// a 401 from any request.
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let status = self.auth.status();

        Effect::new(move |_| {
            let status = status.get();
            let redirect = current_route.with_untracked(|route| shell::follow(status, route));

            if let Some(redirect) = redirect {
                log::info!("[Router] auth state changed, redirecting to {redirect}");
                replace_history_state(&redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

fn provide_router(auth: AuthContext) -> RouterService {
    let router = RouterService::new(auth);

    router.init_popstate_listener();
    router.setup_auth_redirect();
    // Initial load counts as a navigation.
    router.replace(router.current_route.get_untracked());

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

#[component]
pub fn Router(auth: AuthContext, children: Children) -> impl IntoView {
    provide_router(auth);

    children()
}

#[component]
pub fn RouterOutlet(
    /// Maps the current route to its view.
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// In-app link; plain clicks are routed, modified clicks open normally.
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = route.to_path();

    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.go(route.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
