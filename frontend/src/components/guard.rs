use crate::auth::use_auth;
use crate::session::SessionCheck;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[50vh]">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// Renders `children` only for a valid session.
///
/// The check runs once, after mount; until then a spinner is shown. Roles
/// are not looked at here, the router already filtered them.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (check, set_check) = signal(Option::<SessionCheck>::None);

    // Reads nothing reactive, so it runs exactly once.
    Effect::new(move |_| {
        let outcome = auth.store().check();
        if let SessionCheck::Unauthenticated(reason) = outcome {
            log::info!("[Guard] {reason:?}, back to login");
            router.replace(AppRoute::Login);
        }
        set_check.set(Some(outcome));
    });

    move || match check.get() {
        Some(SessionCheck::Authenticated(_)) => children().into_any(),
        _ => view! { <Loading /> }.into_any(),
    }
}
