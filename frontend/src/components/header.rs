use crate::auth::use_auth;
use crate::avatar::use_avatar;
use crate::components::icons::*;
use crate::components::logout::LogoutDialog;
use crate::components::modal::Modal;
use crate::config::AppConfig;
use crate::notifications::NotificationFeed;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use kejaksaan_shared::Role;
use kejaksaan_shared::date::format_case_date;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn AvatarImage(#[prop(optional, into)] class: String) -> impl IntoView {
    let avatar = use_avatar();
    let auth = use_auth();

    let initial = move || {
        auth.username()
            .and_then(|name| name.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    };

    view! {
        <div class=format!("avatar {class}")>
            {move || match avatar.url() {
                Some(url) => view! {
                    <div class="w-10 rounded-full">
                        <img src=url alt="Profile" />
                    </div>
                }
                .into_any(),
                None => view! {
                    <div class="w-10 rounded-full bg-neutral text-neutral-content flex items-center justify-center">
                        <span>{initial}</span>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn NotificationBell() -> impl IntoView {
    let auth = use_auth();
    let config = use_context::<AppConfig>().unwrap_or_default();
    let feed = NotificationFeed::new(auth.api());
    feed.start(&config).bind_to_owner();

    let show_all = RwSignal::new(false);

    let list = move |limit: Option<usize>| {
        let items = feed.items();
        let shown = limit.unwrap_or(items.len());
        items
            .into_iter()
            .take(shown)
            .map(|n| {
                let id = n.id.clone();
                let class = if n.is_read { "" } else { "font-bold bg-primary/5" };
                let received = n
                    .created_at
                    .as_deref()
                    .map(format_case_date)
                    .unwrap_or_default();
                let (headline, detail) = match n.title {
                    Some(title) => (title, Some(n.message)),
                    None => (n.message, None),
                };
                view! {
                    <li>
                        <a class=class on:click=move |_| feed.mark_read(id.clone())>
                            <div class="flex flex-col items-start">
                                <span>{headline}</span>
                                {detail.map(|d| view! { <span class="text-xs opacity-70">{d}</span> })}
                                <span class="text-xs opacity-50">{received}</span>
                            </div>
                        </a>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class="btn btn-ghost btn-circle">
                <div class="indicator">
                    <Bell attr:class="h-5 w-5" />
                    <Show when=move || feed.unread() != 0>
                        <span class="badge badge-xs badge-error indicator-item">
                            {move || feed.unread()}
                        </span>
                    </Show>
                </div>
            </div>
            <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-100 rounded-box w-80 text-base-content">
                <li class="menu-title">"Notifikasi"</li>
                {move || {
                    if feed.items().is_empty() {
                        view! { <li class="disabled"><a>"Tidak ada notifikasi"</a></li> }.into_any()
                    } else {
                        view! {
                            {list(Some(5))}
                            <li>
                                <a class="justify-center text-primary" on:click=move |_| show_all.set(true)>
                                    "Lihat Semua"
                                </a>
                            </li>
                        }
                        .into_any()
                    }
                }}
            </ul>
        </div>

        <Modal open=show_all title="Semua Notifikasi">
            <ul class="menu w-full">{move || list(None)}</ul>
            <div class="modal-action">
                <button class="btn" on:click=move |_| show_all.set(false)>"Tutup"</button>
            </div>
        </Modal>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let avatar = use_avatar();
    let router = use_router();
    let logout_open = RwSignal::new(false);

    // Fetch the avatar once when nothing is cached yet.
    if avatar.is_empty() {
        let api = auth.api();
        spawn_local(async move {
            match api.get_profile().await {
                Ok(profile) => {
                    if profile.avatar_url.is_some() {
                        avatar.set(profile.avatar_url);
                    }
                }
                Err(e) => log::debug!("[Header] avatar not loaded: {e}"),
            }
        });
    }

    let role = move || auth.role().unwrap_or(Role::User);
    let profile_route = move || match role() {
        Role::Admin => AppRoute::AdminProfile,
        Role::User => AppRoute::UserProfile,
    };

    view! {
        <div class="navbar bg-primary text-primary-content shadow-lg px-4">
            <div class="flex-1 gap-2">
                <Scale attr:class="h-6 w-6" />
                <span class="text-xl font-semibold">
                    {move || match role() {
                        Role::Admin => "Admin Dashboard",
                        Role::User => "User Dashboard",
                    }}
                </span>
            </div>
            <div class="flex-none gap-2 items-center">
                {move || match role() {
                    Role::Admin => view! {
                        <Link route=AppRoute::AdminHome class="btn btn-ghost gap-2">
                            <Home attr:class="h-4 w-4" /> "Dashboard"
                        </Link>
                    }
                    .into_any(),
                    Role::User => view! {
                        <Link route=AppRoute::UserHome class="btn btn-ghost gap-2">
                            <Home attr:class="h-4 w-4" /> "Dashboard"
                        </Link>
                        <Link route=AppRoute::Files class="btn btn-ghost btn-circle">
                            <FileText attr:class="h-5 w-5" />
                        </Link>
                        <NotificationBell />
                    }
                    .into_any(),
                }}

                <div class="dropdown dropdown-end">
                    <div tabindex="0" role="button" class="btn btn-ghost btn-circle">
                        <AvatarImage />
                    </div>
                    <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-100 rounded-box w-56 text-base-content">
                        <li class="menu-title">
                            <span class="font-bold">{move || auth.username().unwrap_or_default()}</span>
                            <span class="text-xs">
                                {move || match role() {
                                    Role::Admin => "Administrator",
                                    Role::User => "User",
                                }}
                            </span>
                        </li>
                        <li>
                            <a on:click=move |_| router.go(profile_route())>
                                <UserIcon attr:class="h-4 w-4" /> "Profile"
                            </a>
                        </li>
                        <li>
                            <a on:click=move |_| router.go(AppRoute::Files)>
                                <FileText attr:class="h-4 w-4" /> "Files"
                            </a>
                        </li>
                        <li>
                            <a on:click=move |_| router.go(AppRoute::CaseSchedule)>
                                <Calendar attr:class="h-4 w-4" /> "Jadwal Kasus"
                            </a>
                        </li>
                        <li>
                            <a class="text-error" on:click=move |_| logout_open.set(true)>
                                <LogOut attr:class="h-4 w-4" /> "Logout"
                            </a>
                        </li>
                    </ul>
                </div>
            </div>
        </div>

        <LogoutDialog open=logout_open />
    }
}
