//! Kejaksaan case-management dashboard.
//!
//! Context-driven layout:
//! - `session` / `shell`: stored credentials and the pure auth state machine
//! - `auth`: reactive wrapper that the router consults on every navigation
//! - `api`: the single HTTP client every view goes through
//! - `web::route` / `web::router`: route table and history-backed router
//! - `components`: pages and shared widgets

mod api;
mod auth;
mod avatar;
mod config;
mod notifications;
mod notify;
mod session;
mod shell;

mod components {
    pub mod admin_dashboard;
    pub mod admin_profile;
    pub mod case_detail;
    pub mod case_dialog;
    pub mod case_list;
    pub mod category;
    pub mod dashboard;
    pub mod files;
    pub mod footer;
    pub mod form_field;
    pub mod guard;
    pub mod header;
    pub mod icons;
    pub mod login;
    pub mod logout;
    pub mod modal;
    pub mod profile;
    pub mod schedule;
    pub mod user_management;
}

/// Thin wrappers over browser APIs.
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod storage;
    pub mod timer;
}

use crate::auth::{AuthContext, use_auth};
use crate::avatar::provide_avatar;
use crate::components::admin_dashboard::AdminDashboardPage;
use crate::components::admin_profile::AdminProfilePage;
use crate::components::case_detail::CaseDetailPage;
use crate::components::case_list::CaseListPage;
use crate::components::category::CategoryPage;
use crate::components::dashboard::DashboardPage;
use crate::components::files::FilesPage;
use crate::components::footer::Footer;
use crate::components::guard::{Loading, ProtectedRoute};
use crate::components::header::Header;
use crate::components::login::LoginPage;
use crate::components::profile::ProfilePage;
use crate::components::schedule::SchedulePage;
use crate::components::user_management::UserManagementPage;
use crate::config::AppConfig;
use crate::notify::{ToastHost, provide_notifier};
use crate::session::SessionStore;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet, use_router};

/// Page body for an authenticated route.
fn page(route: AppRoute) -> AnyView {
    match route {
        AppRoute::UserHome => view! { <DashboardPage /> }.into_any(),
        AppRoute::UserProfile => view! { <ProfilePage /> }.into_any(),
        AppRoute::CaseList { category } => view! { <CaseListPage category=category /> }.into_any(),
        AppRoute::CaseDetail { id } => view! { <CaseDetailPage id=id /> }.into_any(),
        AppRoute::Categories => view! { <CategoryPage /> }.into_any(),
        AppRoute::Files => view! { <FilesPage /> }.into_any(),
        AppRoute::CaseSchedule => view! { <SchedulePage /> }.into_any(),
        AppRoute::AdminHome => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::AdminProfile => view! { <AdminProfilePage /> }.into_any(),
        AppRoute::AdminUsers => view! { <UserManagementPage /> }.into_any(),
        AppRoute::Login | AppRoute::Root | AppRoute::NotFound => view! { <Loading /> }.into_any(),
    }
}

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        // Only visible for the instant before the router redirects.
        AppRoute::Root | AppRoute::NotFound => view! { <Loading /> }.into_any(),
        route => {
            let route = StoredValue::new(route);
            view! { <ProtectedRoute>{move || page(route.get_value())}</ProtectedRoute> }.into_any()
        }
    }
}

/// Header and footer stay mounted across navigations; only the outlet
/// swaps pages.
#[component]
fn Layout() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let status = auth.status();
    let chrome = move || {
        let status = status.get();
        router.current_route().with(|route| shell::shows_chrome(status, route))
    };

    view! {
        <div class="flex flex-col min-h-screen bg-base-200">
            <Show when=chrome>
                <Header />
            </Show>
            <main class="flex-1">
                <RouterOutlet matcher=route_matcher />
            </main>
            <Show when=chrome>
                <Footer />
            </Show>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    log::debug!("[App] backend at {}", config.api_url);
    provide_context(config.clone());

    let store = SessionStore::browser();
    let auth = AuthContext::new(&config, store.clone());
    provide_context(auth);
    provide_avatar(store);
    provide_notifier();

    view! {
        <Router auth=auth>
            <Layout />
        </Router>
        <ToastHost />
    }
}
