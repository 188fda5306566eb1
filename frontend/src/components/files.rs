use crate::api::ApiError;
use crate::auth::use_auth;
use crate::components::guard::Loading;
use crate::components::icons::*;
use crate::components::modal::{ConfirmDialog, Modal};
use crate::notify::use_notifier;
use crate::web::http::UploadFile;
use kejaksaan_shared::date::format_case_date;
use kejaksaan_shared::protocol::EntryKind;
use kejaksaan_shared::view_model::{
    BrowserItem, FileKind, browser_items, folder_path, format_file_size, viewer_url,
};
use kejaksaan_shared::{FileEntry, FileListing, Id};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Something queued for deletion.
#[derive(Debug, Clone, PartialEq)]
struct PendingDelete {
    kind: EntryKind,
    id: Id,
    name: String,
}

fn open_in_viewer(url: &str) {
    let target = viewer_url(url);
    if let Err(e) = window().open_with_url_and_target(&target, "_blank") {
        log::warn!("[Files] could not open viewer: {e:?}");
    }
}

#[component]
pub fn FilesPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let path = RwSignal::new(Vec::<String>::new());
    let listing = RwSignal::new(FileListing::default());
    let query = RwSignal::new(String::new());
    let (loading, set_loading) = signal(true);
    let (uploading, set_uploading) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let folder_open = RwSignal::new(false);
    let folder_name = RwSignal::new(String::new());
    let folder_error = RwSignal::new(Option::<String>::None);
    let preview = RwSignal::new(Option::<FileEntry>::None);
    let preview_open = RwSignal::new(false);
    let delete_open = RwSignal::new(false);
    let pending = RwSignal::new(Option::<PendingDelete>::None);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let current = move || path.with_untracked(|stack| folder_path(stack));

    let load = move || {
        let api = auth.api();
        let at = current();
        set_loading.set(true);
        spawn_local(async move {
            match api.list_files(&at).await {
                Ok(found) => {
                    set_error.set(None);
                    listing.set(found);
                }
                Err(e) => set_error.set(Some(e.user_message("Gagal memuat daftar file"))),
            }
            set_loading.set(false);
        });
    };

    // Reload whenever the folder changes.
    Effect::new(move |_| {
        path.track();
        load();
    });

    let enter = move |name: String| {
        query.set(String::new());
        path.update(|stack| stack.push(name));
    };
    let up = move |_| {
        path.update(|stack| {
            stack.pop();
        });
    };
    let jump = move |depth: usize| path.update(|stack| stack.truncate(depth));

    let on_file = move |ev: web_sys::Event| {
        let Some(file) = UploadFile::from_change_event(&ev) else {
            return;
        };
        let api = auth.api();
        let at = current();
        set_uploading.set(true);
        spawn_local(async move {
            match api.upload_file(file, &at).await {
                Ok(()) => {
                    notifier.success("File berhasil diupload");
                    load();
                }
                Err(e) => notifier.api_error(&e, "Gagal mengupload file"),
            }
            set_uploading.set(false);
        });
    };

    let open_folder_dialog = move |_| {
        folder_name.set(String::new());
        folder_error.set(None);
        folder_open.set(true);
    };

    let on_create_folder = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = auth.api();
        let name = folder_name.get_untracked();
        let at = current();
        spawn_local(async move {
            match api.create_folder(&name, &at).await {
                Ok(()) => {
                    folder_open.set(false);
                    notifier.success("Folder berhasil dibuat");
                    load();
                }
                Err(ApiError::Validation(message)) => folder_error.set(Some(message)),
                Err(e) => notifier.api_error(&e, "Gagal membuat folder"),
            }
        });
    };

    let ask_delete = move |target: PendingDelete| {
        pending.set(Some(target));
        delete_open.set(true);
    };

    let on_delete = move |_: ()| {
        let Some(target) = pending.get_untracked() else {
            return;
        };
        let api = auth.api();
        spawn_local(async move {
            match api.delete_entry(target.kind, &target.id).await {
                Ok(()) => {
                    notifier.success(format!("\"{}\" berhasil dihapus", target.name));
                    load();
                }
                Err(e) => notifier.api_error(&e, "Gagal menghapus"),
            }
            pending.set(None);
        });
    };

    let open_file = move |file: FileEntry| {
        let kind = FileKind::from_mime(file.file_type.as_deref());
        let url = file.url.clone();
        match (kind, url.as_deref()) {
            (FileKind::Image, Some(_)) => {
                preview.set(Some(file));
                preview_open.set(true);
            }
            (kind, Some(url)) if kind.uses_viewer() => open_in_viewer(url),
            (_, Some(url)) => {
                if let Err(e) = window().open_with_url_and_target(url, "_blank") {
                    log::warn!("[Files] could not open file: {e:?}");
                }
            }
            (_, None) => notifier.error("File tidak memiliki URL"),
        }
    };

    let render_item = move |item: BrowserItem| match item {
        BrowserItem::Folder(folder) => {
            let name = folder.name.clone();
            let target = PendingDelete {
                kind: EntryKind::Folder,
                id: folder.id.clone(),
                name: folder.name.clone(),
            };
            view! {
                <tr class="hover cursor-pointer">
                    <td on:click=move |_| enter(name.clone())>
                        <div class="flex items-center gap-2">
                            <Folder attr:class="h-5 w-5 text-warning" />
                            <span class="font-medium">{folder.name}</span>
                        </div>
                    </td>
                    <td>"-"</td>
                    <td>{folder.created_at.as_deref().map(format_case_date).unwrap_or_default()}</td>
                    <td class="text-right">
                        <button class="btn btn-ghost btn-sm btn-circle" on:click=move |_| ask_delete(target.clone())>
                            <Trash2 attr:class="h-4 w-4 text-error" />
                        </button>
                    </td>
                </tr>
            }
            .into_any()
        }
        BrowserItem::File(file) => {
            let kind = FileKind::from_mime(file.file_type.as_deref());
            let target = PendingDelete {
                kind: EntryKind::File,
                id: file.id.clone(),
                name: file.name.clone(),
            };
            let size = file.size.map(format_file_size).unwrap_or_else(|| "-".to_string());
            let created = file.created_at.as_deref().map(format_case_date).unwrap_or_default();
            let download = file.url.clone();
            let name = file.name.clone();
            let entry = file.clone();
            view! {
                <tr class="hover cursor-pointer">
                    <td on:click=move |_| open_file(entry.clone())>
                        <div class="flex items-center gap-2">
                            {match kind {
                                FileKind::Image => view! { <ImageIcon attr:class="h-5 w-5 text-info" /> }.into_any(),
                                _ => view! { <FileText attr:class="h-5 w-5 text-primary" /> }.into_any(),
                            }}
                            <span>{name}</span>
                        </div>
                    </td>
                    <td>{size}</td>
                    <td>{created}</td>
                    <td class="text-right whitespace-nowrap">
                        {download.map(|url| view! {
                            <a class="btn btn-ghost btn-sm btn-circle" href=url download="" target="_blank">
                                <Download attr:class="h-4 w-4" />
                            </a>
                        })}
                        <button class="btn btn-ghost btn-sm btn-circle" on:click=move |_| ask_delete(target.clone())>
                            <Trash2 attr:class="h-4 w-4 text-error" />
                        </button>
                    </td>
                </tr>
            }
            .into_any()
        }
    };

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h1 class="text-2xl font-bold">"Manajemen File"</h1>
                <div class="flex gap-2">
                    <input type="file" class="hidden" node_ref=file_input on:change=on_file />
                    <button class="btn btn-outline gap-2" on:click=open_folder_dialog>
                        <FolderPlus attr:class="h-4 w-4" /> "Folder Baru"
                    </button>
                    <button
                        class="btn btn-primary gap-2"
                        disabled=move || uploading.get()
                        on:click=move |_| {
                            if let Some(input) = file_input.get() {
                                input.click();
                            }
                        }
                    >
                        <Upload attr:class="h-4 w-4" />
                        {move || if uploading.get() { "Mengupload..." } else { "Upload File" }}
                    </button>
                </div>
            </div>

            <div class="flex flex-wrap items-center gap-2">
                <Show when=move || path.with(|stack| !stack.is_empty())>
                    <button class="btn btn-ghost btn-sm btn-circle" on:click=up>
                        <ChevronLeft attr:class="h-4 w-4" />
                    </button>
                </Show>
                <div class="breadcrumbs text-sm flex-1">
                    <ul>
                        <li><a on:click=move |_| jump(0)>"Root"</a></li>
                        {move || {
                            path.get()
                                .into_iter()
                                .enumerate()
                                .map(|(i, name)| view! { <li><a on:click=move |_| jump(i + 1)>{name}</a></li> })
                                .collect_view()
                        }}
                    </ul>
                </div>
                <label class="input input-bordered input-sm flex items-center gap-2">
                    <Search attr:class="h-4 w-4 opacity-70" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Cari file..."
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                </label>
            </div>

            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error">{move || error.get().unwrap_or_default()}</div>
            </Show>

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_any();
                }
                let items = listing.with(|l| query.with(|q| browser_items(l, q)));
                if items.is_empty() {
                    return view! {
                        <div class="text-center py-8 text-base-content/50">"Folder ini kosong."</div>
                    }
                    .into_any();
                }
                view! {
                    <div class="overflow-x-auto card bg-base-100 shadow">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Nama"</th>
                                    <th>"Ukuran"</th>
                                    <th>"Dibuat"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {items.into_iter().map(render_item).collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
                .into_any()
            }}
        </div>

        <Modal open=folder_open title="Buat Folder Baru">
            <form on:submit=on_create_folder class="space-y-4">
                <input
                    type="text"
                    placeholder="Nama folder"
                    class=move || if folder_error.get().is_some() { "input input-bordered input-error w-full" } else { "input input-bordered w-full" }
                    prop:value=move || folder_name.get()
                    on:input=move |ev| {
                        folder_error.set(None);
                        folder_name.set(event_target_value(&ev));
                    }
                />
                <Show when=move || folder_error.get().is_some()>
                    <p class="text-error text-sm">{move || folder_error.get().unwrap_or_default()}</p>
                </Show>
                <div class="modal-action">
                    <button type="button" class="btn" on:click=move |_| folder_open.set(false)>"Batal"</button>
                    <button type="submit" class="btn btn-primary">"Buat"</button>
                </div>
            </form>
        </Modal>

        <Modal
            open=preview_open
            title=Signal::derive(move || preview.with(|p| p.as_ref().map(|f| f.name.clone()).unwrap_or_default()))
            class="max-w-4xl"
        >
            {move || preview.get().and_then(|f| f.url).map(|url| view! {
                <img src=url class="max-h-[70vh] mx-auto rounded" alt="Preview" />
            })}
            <div class="modal-action">
                <button class="btn" on:click=move |_| preview_open.set(false)>"Tutup"</button>
            </div>
        </Modal>

        <ConfirmDialog
            open=delete_open
            title="Konfirmasi Penghapusan"
            message=Signal::derive(move || {
                pending.with(|p| match p {
                    Some(target) => format!("Yakin ingin menghapus \"{}\"?", target.name),
                    None => String::new(),
                })
            })
            on_confirm=on_delete
        />
    }
}
