use crate::auth::use_auth;
use crate::components::form_field::FormField;
use crate::components::guard::Loading;
use crate::components::icons::{Pencil, Plus, Trash2};
use crate::components::modal::{ConfirmDialog, Modal};
use crate::notify::use_notifier;
use crate::web::storage::{BrowserStorage, Storage};
use kejaksaan_shared::validation::{FieldErrors, validate_user_form};
use kejaksaan_shared::{Id, UserAccount, UserForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Transient flag: open the create dialog on the next visit.
const NEW_USER_KEY: &str = "openAddUserDialog";

/// Asks the user management page to open its create dialog once.
pub fn request_new_user() {
    BrowserStorage::Session.set(NEW_USER_KEY, "true");
}

fn take_new_user_request() -> bool {
    let requested = BrowserStorage::Session.get(NEW_USER_KEY).is_some();
    if requested {
        BrowserStorage::Session.delete(NEW_USER_KEY);
    }
    requested
}

#[derive(Clone, Copy)]
struct UserFormState {
    /// `None` while creating.
    editing: RwSignal<Option<Id>>,
    username: RwSignal<String>,
    email: RwSignal<String>,
    password: RwSignal<String>,
    position: RwSignal<String>,
    phone: RwSignal<String>,
    office: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
}

impl UserFormState {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            username: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            position: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            office: RwSignal::new(String::new()),
            errors: RwSignal::new(FieldErrors::new()),
        }
    }

    fn fill(&self, id: Option<Id>, form: UserForm) {
        self.editing.set(id);
        self.username.set(form.username);
        self.email.set(form.email);
        self.password.set(form.password.unwrap_or_default());
        self.position.set(form.position);
        self.phone.set(form.phone);
        self.office.set(form.office);
        self.errors.set(FieldErrors::new());
    }

    fn is_new(&self) -> bool {
        self.editing.with(Option::is_none)
    }

    fn to_form(self) -> UserForm {
        UserForm {
            username: self.username.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            password: Some(self.password.get_untracked()),
            position: self.position.get_untracked(),
            phone: self.phone.get_untracked(),
            office: self.office.get_untracked(),
        }
    }

    /// Marks failing fields inline and returns `None` if any.
    fn validated(&self) -> Option<UserForm> {
        let form = self.to_form();
        match validate_user_form(&form, self.editing.with_untracked(Option::is_none)) {
            Ok(()) => {
                self.errors.set(FieldErrors::new());
                Some(form)
            }
            Err(errors) => {
                self.errors.set(errors);
                None
            }
        }
    }

    fn error(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
    }
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().filter(|v| !v.is_empty()).unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn UserManagementPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (users, set_users) = signal(Vec::<UserAccount>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (saving, set_saving) = signal(false);

    let form_open = RwSignal::new(false);
    let delete_open = RwSignal::new(false);
    let to_delete = RwSignal::new(Option::<UserAccount>::None);
    let form = UserFormState::new();

    let load = move || {
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            match api.list_users().await {
                Ok(found) => {
                    set_error.set(None);
                    set_users.set(found);
                }
                Err(e) => set_error.set(Some(e.user_message("Gagal mengambil data pengguna"))),
            }
            set_loading.set(false);
        });
    };

    load();

    let open_create = move || {
        form.fill(None, UserForm::default());
        form_open.set(true);
    };

    let open_edit = move |account: UserAccount| {
        form.fill(Some(account.id.clone()), UserForm::from_account(&account));
        form_open.set(true);
    };

    if take_new_user_request() {
        open_create();
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(user) = form.validated() else {
            return;
        };
        let id = form.editing.get_untracked();
        let api = auth.api();
        set_saving.set(true);
        spawn_local(async move {
            match api.save_user(id.as_ref(), user).await {
                Ok(()) => {
                    form_open.set(false);
                    notifier.success(if id.is_some() {
                        "Pengguna berhasil diperbarui"
                    } else {
                        "Pengguna berhasil ditambahkan"
                    });
                    load();
                }
                Err(e) => notifier.api_error(&e, "Gagal menyimpan pengguna"),
            }
            set_saving.set(false);
        });
    };

    let on_delete = move |_: ()| {
        let Some(account) = to_delete.get_untracked() else {
            return;
        };
        let api = auth.api();
        spawn_local(async move {
            match api.delete_user(&account.id).await {
                Ok(()) => {
                    notifier.success("Pengguna berhasil dihapus");
                    set_users.update(|list| list.retain(|u| u.id != account.id));
                }
                Err(e) => notifier.api_error(&e, "Gagal menghapus pengguna"),
            }
            to_delete.set(None);
        });
    };

    view! {
        <div class="max-w-6xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-primary">"Manajemen Pengguna"</h1>
                <button class="btn btn-primary gap-2" on:click=move |_| open_create()>
                    <Plus attr:class="h-4 w-4" /> "Tambah Pengguna"
                </button>
            </div>

            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error">{move || error.get().unwrap_or_default()}</div>
            </Show>

            {move || {
                if loading.get() && users.with(Vec::is_empty) {
                    return view! { <Loading /> }.into_any();
                }
                view! {
                    <div class="overflow-x-auto card bg-base-100 shadow">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Username"</th>
                                    <th>"Email"</th>
                                    <th>"Jabatan"</th>
                                    <th>"Telepon"</th>
                                    <th>"Kantor"</th>
                                    <th class="text-center">"Aksi"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || users.get()
                                    key=|u| u.id.clone()
                                    children=move |account| {
                                        let for_edit = account.clone();
                                        let for_delete = account.clone();
                                        view! {
                                            <tr class="hover">
                                                <td>{account.username.clone()}</td>
                                                <td>{account.email.clone()}</td>
                                                <td>{or_dash(&account.position)}</td>
                                                <td>{or_dash(&account.phone)}</td>
                                                <td>{or_dash(&account.office)}</td>
                                                <td class="text-center whitespace-nowrap">
                                                    <button class="btn btn-ghost btn-sm btn-circle" on:click=move |_| open_edit(for_edit.clone())>
                                                        <Pencil attr:class="h-4 w-4 text-primary" />
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-circle"
                                                        on:click=move |_| {
                                                            to_delete.set(Some(for_delete.clone()));
                                                            delete_open.set(true);
                                                        }
                                                    >
                                                        <Trash2 attr:class="h-4 w-4 text-error" />
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                }
                .into_any()
            }}
        </div>

        <Modal
            open=form_open
            title=Signal::derive(move || if form.is_new() { "Tambah Pengguna".to_string() } else { "Edit Pengguna".to_string() })
        >
            <form on:submit=on_submit class="space-y-2">
                <FormField id="user-username" label="Username" value=form.username error=form.error("username") />
                <FormField id="user-email" label="Email" value=form.email error=form.error("email") input_type="email" />
                {move || {
                    let label = if form.is_new() { "Password" } else { "Password (kosongkan jika tidak diubah)" };
                    view! {
                        <FormField id="user-password" label=label value=form.password error=form.error("password") input_type="password" />
                    }
                }}
                <FormField id="user-position" label="Jabatan" value=form.position />
                <FormField id="user-phone" label="Telepon" value=form.phone input_type="tel" />
                <FormField id="user-office" label="Kantor" value=form.office />
                <div class="modal-action">
                    <button type="button" class="btn" on:click=move |_| form_open.set(false)>"Batal"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || match (saving.get(), form.is_new()) {
                            (true, _) => "Menyimpan...",
                            (false, true) => "Tambah",
                            (false, false) => "Simpan",
                        }}
                    </button>
                </div>
            </form>
        </Modal>

        <ConfirmDialog
            open=delete_open
            title="Konfirmasi Hapus"
            message=Signal::derive(move || {
                to_delete.with(|u| match u {
                    Some(account) => format!("Apakah Anda yakin ingin menghapus pengguna {}?", account.username),
                    None => String::new(),
                })
            })
            on_confirm=on_delete
        />
    }
}
