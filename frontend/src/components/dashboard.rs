use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::modal::Modal;
use crate::notify::use_notifier;
use crate::web::http::UploadFile;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notifier = use_notifier();

    let welcome_open = RwSignal::new(false);
    let (uploading, set_uploading) = signal(false);
    let file_input = NodeRef::<leptos::html::Input>::new();

    // Welcome once per login; the flag is wiped with the rest of the store.
    Effect::new(move |_| {
        let store = auth.store();
        if !store.welcome_shown() && store.username().is_some() {
            store.mark_welcome_shown();
            welcome_open.set(true);
        }
    });

    let on_file = move |ev: web_sys::Event| {
        let Some(file) = UploadFile::from_change_event(&ev) else {
            return;
        };
        let api = auth.api();
        set_uploading.set(true);
        spawn_local(async move {
            match api.upload_file(file, "").await {
                Ok(()) => notifier.success("File berhasil diupload"),
                Err(e) => notifier.api_error(&e, "Gagal mengupload file"),
            }
            set_uploading.set(false);
        });
    };

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-8">
            <h1 class="text-3xl font-bold text-center">"Dashboard Penjadwalan Tindak Pidana Khusus"</h1>

            <div class="grid gap-6 md:grid-cols-2">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body items-center text-center">
                        <Layers attr:class="h-12 w-12 text-primary" />
                        <h2 class="card-title">"Jenis Jadwal"</h2>
                        <p class="text-base-content/70">
                            "Kelola dan pantau proses penyelidikan kasus tindak pidana khusus"
                        </p>
                        <div class="card-actions">
                            <button class="btn btn-primary" on:click=move |_| router.go(AppRoute::Categories)>
                                "Lihat Semua Kategori"
                            </button>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body items-center text-center">
                        <Upload attr:class="h-12 w-12 text-primary" />
                        <h2 class="card-title">"Upload Berkas"</h2>
                        <p class="text-base-content/70">
                            "Upload dan kelola berkas-berkas terkait kasus tindak pidana khusus"
                        </p>
                        <input type="file" class="hidden" node_ref=file_input on:change=on_file />
                        <div class="card-actions">
                            <button
                                class="btn btn-primary"
                                disabled=move || uploading.get()
                                on:click=move |_| {
                                    if let Some(input) = file_input.get() {
                                        input.click();
                                    }
                                }
                            >
                                {move || if uploading.get() {
                                    view! { <span class="loading loading-spinner"></span> "Mengupload..." }.into_any()
                                } else {
                                    "Upload Berkas".into_any()
                                }}
                            </button>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body items-center text-center">
                        <Calendar attr:class="h-12 w-12 text-primary" />
                        <h2 class="card-title">"Jadwal Kasus"</h2>
                        <p class="text-base-content/70">"Lihat jadwal sidang yang akan datang"</p>
                        <div class="card-actions">
                            <button class="btn btn-primary" on:click=move |_| router.go(AppRoute::CaseSchedule)>
                                "Lihat Jadwal"
                            </button>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body items-center text-center">
                        <Folder attr:class="h-12 w-12 text-primary" />
                        <h2 class="card-title">"Berkas"</h2>
                        <p class="text-base-content/70">"Telusuri folder dan berkas yang telah diupload"</p>
                        <div class="card-actions">
                            <button class="btn btn-primary" on:click=move |_| router.go(AppRoute::Files)>
                                "Buka Berkas"
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </div>

        <Modal open=welcome_open title="Selamat Datang!" class="text-center">
            <p class="text-xl font-bold mb-2">
                "Halo, " {move || auth.username().unwrap_or_default()} "!"
            </p>
            <p class="text-base-content/70">
                "Selamat datang di Dashboard Penjadwalan Tindak Pidana Khusus. "
                "Kami siap membantu Anda mengelola kasus-kasus dengan efisien."
            </p>
            <div class="modal-action justify-center">
                <button class="btn btn-primary btn-lg" on:click=move |_| welcome_open.set(false)>
                    "Mulai"
                </button>
            </div>
        </Modal>
    }
}
