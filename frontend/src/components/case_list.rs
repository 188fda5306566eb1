use crate::auth::use_auth;
use crate::components::case_dialog::{CaseDialog, CaseFormState};
use crate::components::guard::Loading;
use crate::components::icons::{ChevronLeft, Plus, RefreshCw};
use crate::notify::use_notifier;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use kejaksaan_shared::view_model::CaseRow;
use kejaksaan_shared::{CaseCategory, CaseDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn CaseListPage(category: CaseCategory) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notifier = use_notifier();

    let (rows, set_rows) = signal(Vec::<CaseRow>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    let dialog_open = RwSignal::new(false);
    let (saving, set_saving) = signal(false);
    let form = CaseFormState::new();

    let load = move || {
        let api = auth.api();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api.list_cases(Some(category)).await {
                Ok(cases) => set_rows.set(cases.iter().map(CaseRow::from).collect()),
                Err(e) => set_error.set(Some(e.user_message("Gagal mengambil data kasus"))),
            }
            set_loading.set(false);
        });
    };

    load();

    let open_dialog = move |_| {
        form.reset();
        dialog_open.set(true);
    };

    let on_create = move |draft: CaseDraft| {
        let api = auth.api();
        let title = draft.title.clone();
        set_saving.set(true);
        spawn_local(async move {
            match api.create_case_and_refresh(draft, category).await {
                Ok(cases) => {
                    set_rows.set(cases.iter().map(CaseRow::from).collect());
                    dialog_open.set(false);
                    notifier.success(format!("Kasus baru \"{title}\" telah ditambahkan"));
                }
                Err(e) => notifier.api_error(&e, "Gagal menambahkan kasus baru"),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="max-w-4xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex items-center gap-2">
                <button class="btn btn-ghost btn-circle" on:click=move |_| router.go(AppRoute::Categories)>
                    <ChevronLeft attr:class="h-5 w-5" />
                </button>
                <div class="breadcrumbs text-sm">
                    <ul>
                        <li><Link route=AppRoute::Categories>"Kategori"</Link></li>
                        <li>{category.title()}</li>
                    </ul>
                </div>
            </div>

            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"Daftar Kasus " {category.title()}</h2>
                <div class="flex gap-2">
                    <button on:click=move |_| load() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                        <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                    <button class="btn btn-primary gap-2" on:click=open_dialog>
                        <Plus attr:class="h-4 w-4" /> "Tambah Kasus Baru"
                    </button>
                </div>
            </div>

            {move || {
                if let Some(message) = error.get() {
                    return view! { <div role="alert" class="alert alert-error">{message}</div> }.into_any();
                }
                if loading.get() && rows.with(Vec::is_empty) {
                    return view! { <Loading /> }.into_any();
                }
                if rows.with(Vec::is_empty) {
                    return view! {
                        <div class="text-center py-8 text-base-content/50">"Belum ada kasus."</div>
                    }
                    .into_any();
                }
                view! {
                    <div class="grid gap-4">
                        <For
                            each=move || rows.get()
                            key=|row| row.id.clone()
                            children=move |row| {
                                let route = AppRoute::CaseDetail { id: row.id.clone() };
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body">
                                            <div class="flex items-start justify-between gap-2">
                                                <h3 class="card-title">{row.title}</h3>
                                                <span class="badge badge-outline">{row.status}</span>
                                            </div>
                                            <p class="text-sm text-base-content/70">"Tanggal: " {row.date_label}</p>
                                            <div class="card-actions">
                                                <Link route=route class="btn btn-outline btn-sm">"Lihat Detail"</Link>
                                            </div>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                }
                .into_any()
            }}
        </div>

        <CaseDialog
            open=dialog_open
            title="Tambah Kasus Baru"
            state=form
            saving=saving
            on_submit=on_create
        />
    }
}
