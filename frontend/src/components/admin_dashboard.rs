use crate::components::icons::*;
use crate::components::user_management::request_new_user;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

struct AdminCard {
    title: &'static str,
    description: &'static str,
    /// Statistics and settings have no page yet and fall back to the admin home.
    path: &'static str,
}

const CARDS: [AdminCard; 3] = [
    AdminCard {
        title: "Manajemen Pengguna",
        description: "Kelola akun pengguna sistem",
        path: "/admin/users",
    },
    AdminCard {
        title: "Statistik Sistem",
        description: "Lihat statistik penggunaan sistem",
        path: "/admin/stats",
    },
    AdminCard {
        title: "Pengaturan Sistem",
        description: "Konfigurasi pengaturan sistem",
        path: "/admin/settings",
    },
];

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let router = use_router();

    let cards = CARDS
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let icon = match i {
                0 => view! { <Users attr:class="h-12 w-12 text-primary" /> }.into_any(),
                1 => view! { <BarChart attr:class="h-12 w-12 text-primary" /> }.into_any(),
                _ => view! { <Settings attr:class="h-12 w-12 text-primary" /> }.into_any(),
            };
            let path = card.path;
            view! {
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body items-center text-center">
                        {icon}
                        <h2 class="card-title">{card.title}</h2>
                        <p class="text-base-content/70">{card.description}</p>
                        <div class="card-actions">
                            <button class="btn btn-primary" on:click=move |_| router.navigate(path)>
                                "Buka"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-8">
            <h1 class="text-3xl font-bold">"Dashboard Admin"</h1>
            <div class="grid gap-6 md:grid-cols-3">{cards}</div>

            <div class="card bg-base-200">
                <div class="card-body">
                    <h2 class="card-title">"Aksi Cepat"</h2>
                    <div class="card-actions">
                        <button
                            class="btn btn-secondary gap-2"
                            on:click=move |_| {
                                request_new_user();
                                router.go(AppRoute::AdminUsers);
                            }
                        >
                            <Plus attr:class="h-4 w-4" /> "Tambah Pengguna Baru"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
