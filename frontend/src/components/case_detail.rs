use crate::api::ApiError;
use crate::auth::use_auth;
use crate::components::case_dialog::{CaseDialog, CaseFormState};
use crate::components::guard::Loading;
use crate::components::icons::{ChevronLeft, Pencil, Trash2};
use crate::components::modal::ConfirmDialog;
use crate::config::AFTER_DELETE_DELAY;
use crate::notify::use_notifier;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use kejaksaan_shared::date::format_case_date;
use kejaksaan_shared::view_model::category_label;
use kejaksaan_shared::{CaseCategory, CaseDraft, CaseRecord, Id};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn or_dash(value: Option<String>) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| "-".to_string())
}

/// Where "back" leads for a case of this `type`.
fn list_route(record: &CaseRecord) -> AppRoute {
    record
        .category
        .as_deref()
        .and_then(CaseCategory::from_slug)
        .map(|category| AppRoute::CaseList { category })
        .unwrap_or(AppRoute::Categories)
}

#[component]
pub fn CaseDetailPage(id: Id) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notifier = use_notifier();
    let id = StoredValue::new(id);

    let (record, set_record) = signal(Option::<CaseRecord>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    let edit_open = RwSignal::new(false);
    let delete_open = RwSignal::new(false);
    let (saving, set_saving) = signal(false);
    let form = CaseFormState::new();

    let load = move || {
        let api = auth.api();
        let id = id.get_value();
        set_loading.set(true);
        spawn_local(async move {
            match api.get_case(&id).await {
                Ok(case) => {
                    set_error.set(None);
                    set_record.set(Some(case));
                }
                Err(ApiError::NotFound(_)) => {
                    log::info!("[CaseDetail] case {id} not found");
                    router.go(AppRoute::UserHome);
                }
                Err(e) => set_error.set(Some(e.user_message("Gagal mengambil data kasus"))),
            }
            set_loading.set(false);
        });
    };

    load();

    let open_edit = move |_| {
        if let Some(case) = record.get_untracked() {
            form.load(&case);
            edit_open.set(true);
        }
    };

    let on_save = move |draft: CaseDraft| {
        let api = auth.api();
        let id = id.get_value();
        set_saving.set(true);
        spawn_local(async move {
            match api.update_case(&id, draft).await {
                Ok(case) => {
                    set_record.set(Some(case));
                    edit_open.set(false);
                    notifier.success("Perubahan berhasil disimpan");
                }
                Err(e) => notifier.api_error(&e, "Gagal menyimpan perubahan"),
            }
            set_saving.set(false);
        });
    };

    let on_delete = move |_: ()| {
        let api = auth.api();
        let id = id.get_value();
        let back = record
            .get_untracked()
            .map(|case| list_route(&case))
            .unwrap_or(AppRoute::Categories);
        spawn_local(async move {
            match api.delete_case(&id).await {
                Ok(()) => {
                    notifier.success("Jadwal berhasil dihapus");
                    set_timeout(move || router.go(back), AFTER_DELETE_DELAY);
                }
                Err(e) => notifier.api_error(&e, "Gagal menghapus jadwal"),
            }
        });
    };

    let back = move |_| {
        let route = record
            .get_untracked()
            .map(|case| list_route(&case))
            .unwrap_or(AppRoute::Categories);
        router.go(route);
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex items-center gap-2">
                <button class="btn btn-ghost btn-circle" on:click=back>
                    <ChevronLeft attr:class="h-5 w-5" />
                </button>
                <div class="breadcrumbs text-sm">
                    <ul>
                        <li><Link route=AppRoute::Categories>"Kategori"</Link></li>
                        {move || record.get().map(|case| {
                            let label = category_label(case.category.as_deref());
                            view! { <li><Link route=list_route(&case)>{label}</Link></li> }
                        })}
                        <li>"Detail Kasus"</li>
                    </ul>
                </div>
            </div>

            {move || {
                if loading.get() && record.with(Option::is_none) {
                    return view! { <Loading /> }.into_any();
                }
                if let Some(message) = error.get() {
                    return view! { <div role="alert" class="alert alert-error">{message}</div> }.into_any();
                }
                let Some(case) = record.get() else {
                    return ().into_any();
                };
                view! {
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body space-y-2">
                            <div class="flex items-start justify-between gap-2">
                                <h2 class="card-title text-2xl">{case.title.clone()}</h2>
                                <span class="badge badge-outline">{case.status_label().to_string()}</span>
                            </div>
                            <p><strong>"Tanggal: "</strong>{format_case_date(&case.date)}</p>
                            <p><strong>"Deskripsi: "</strong>{or_dash(case.description.clone())}</p>
                            <p><strong>"Pihak Terkait: "</strong>{or_dash(case.parties.clone())}</p>
                            <p><strong>"Saksi: "</strong>{or_dash(case.witnesses.clone())}</p>
                            <p><strong>"Jaksa: "</strong>{or_dash(case.prosecutor.clone())}</p>
                            <p><strong>"Kategori: "</strong>{category_label(case.category.as_deref())}</p>
                            <div class="card-actions justify-end mt-4">
                                <button class="btn btn-primary gap-2" on:click=open_edit>
                                    <Pencil attr:class="h-4 w-4" /> "Edit"
                                </button>
                                <button class="btn btn-error gap-2" on:click=move |_| delete_open.set(true)>
                                    <Trash2 attr:class="h-4 w-4" /> "Hapus"
                                </button>
                            </div>
                        </div>
                    </div>
                }
                .into_any()
            }}
        </div>

        <CaseDialog
            open=edit_open
            title="Edit Kasus"
            state=form
            saving=saving
            on_submit=on_save
            full=true
        />
        <ConfirmDialog
            open=delete_open
            title="Konfirmasi Penghapusan"
            message="Apakah Anda yakin ingin menghapus kasus ini? Tindakan ini tidak dapat dibatalkan."
            on_confirm=on_delete
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Option<&str>) -> CaseRecord {
        CaseRecord {
            id: Id::from(1),
            title: "Korupsi dana desa".to_string(),
            date: "2024-03-01".to_string(),
            description: None,
            parties: None,
            witnesses: None,
            prosecutor: None,
            category: category.map(str::to_string),
            status: None,
        }
    }

    #[test]
    fn back_leads_to_the_case_category() {
        assert_eq!(
            list_route(&record(Some("penyidikan"))),
            AppRoute::CaseList {
                category: CaseCategory::Penyidikan
            }
        );
    }

    #[test]
    fn unknown_or_missing_category_goes_to_the_index() {
        assert_eq!(list_route(&record(Some("perdata"))), AppRoute::Categories);
        assert_eq!(list_route(&record(None)), AppRoute::Categories);
    }

    #[test]
    fn blank_values_show_a_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("  ".to_string())), "-");
        assert_eq!(or_dash(Some("Budi".to_string())), "Budi");
    }
}
