use crate::api::ApiError;
use crate::auth::use_auth;
use crate::avatar::use_avatar;
use crate::components::form_field::FormField;
use crate::components::guard::Loading;
use crate::components::icons::{Camera, LogOut, Pencil};
use crate::components::logout::LogoutDialog;
use crate::notify::use_notifier;
use crate::web::http::UploadFile;
use kejaksaan_shared::{Profile, ProfileUpdate};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Editable copy of the profile fields.
#[derive(Clone, Copy)]
struct ProfileForm {
    username: RwSignal<String>,
    email: RwSignal<String>,
    position: RwSignal<String>,
    phone: RwSignal<String>,
    office: RwSignal<String>,
}

impl ProfileForm {
    fn new() -> Self {
        Self {
            username: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            position: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            office: RwSignal::new(String::new()),
        }
    }

    fn load(&self, profile: &Profile) {
        let update = ProfileUpdate::from(profile);
        self.username.set(update.username);
        self.email.set(update.email);
        self.position.set(update.position);
        self.phone.set(update.phone);
        self.office.set(update.office);
    }

    fn to_update(self) -> ProfileUpdate {
        ProfileUpdate {
            username: self.username.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            position: self.position.get_untracked(),
            phone: self.phone.get_untracked(),
            office: self.office.get_untracked(),
        }
    }
}

fn or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let avatar = use_avatar();
    let notifier = use_notifier();

    let (profile, set_profile) = signal(Option::<Profile>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (editing, set_editing) = signal(false);
    let (saving, set_saving) = signal(false);
    let (uploading, set_uploading) = signal(false);
    let avatar_error = RwSignal::new(Option::<String>::None);
    let logout_open = RwSignal::new(false);
    let form = ProfileForm::new();
    let file_input = NodeRef::<leptos::html::Input>::new();

    {
        let api = auth.api();
        spawn_local(async move {
            match api.get_profile().await {
                Ok(found) => {
                    if found.avatar_url.is_some() {
                        avatar.set(found.avatar_url.clone());
                    }
                    form.load(&found);
                    set_profile.set(Some(found));
                }
                Err(e) => set_error.set(Some(e.user_message("Gagal memuat profil"))),
            }
            set_loading.set(false);
        });
    }

    let start_edit = move |_| {
        if let Some(current) = profile.get_untracked() {
            form.load(&current);
        }
        set_editing.set(true);
    };

    let on_save = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let update = form.to_update();
        if update.username.is_empty() {
            notifier.error("Username tidak boleh kosong");
            return;
        }
        let api = auth.api();
        set_saving.set(true);
        spawn_local(async move {
            match api.update_profile(&update).await {
                Ok(saved) => {
                    auth.set_username(&saved.username);
                    set_profile.set(Some(saved));
                    set_editing.set(false);
                    notifier.success("Profil berhasil diperbarui");
                }
                Err(e) => notifier.api_error(&e, "Gagal memperbarui profil"),
            }
            set_saving.set(false);
        });
    };

    let on_avatar = move |ev: web_sys::Event| {
        let Some(file) = UploadFile::from_change_event(&ev) else {
            return;
        };
        avatar_error.set(None);
        let api = auth.api();
        set_uploading.set(true);
        spawn_local(async move {
            match api.upload_avatar(file).await {
                Ok(url) => {
                    avatar.set(Some(url));
                    notifier.success("Foto profil berhasil diperbarui");
                }
                Err(ApiError::Validation(message)) => avatar_error.set(Some(message)),
                Err(e) => notifier.api_error(&e, "Gagal mengupload foto profil"),
            }
            set_uploading.set(false);
        });
    };

    let initial = move || {
        profile
            .with(|p| p.as_ref().and_then(|p| p.username.chars().next()))
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8 space-y-6">
            <h1 class="text-2xl font-bold">"Profil Saya"</h1>

            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex flex-col items-center gap-2">
                            <div class="avatar">
                                <div class="w-28 rounded-full ring ring-primary ring-offset-base-100 ring-offset-2">
                                    {move || match avatar.url() {
                                        Some(url) => view! { <img src=url alt="Avatar" /> }.into_any(),
                                        None => view! {
                                            <div class="w-full h-full bg-neutral text-neutral-content flex items-center justify-center text-4xl">
                                                {initial}
                                            </div>
                                        }
                                        .into_any(),
                                    }}
                                </div>
                            </div>
                            <input type="file" accept="image/*" class="hidden" node_ref=file_input on:change=on_avatar />
                            <button
                                class="btn btn-sm btn-outline gap-2"
                                disabled=move || uploading.get()
                                on:click=move |_| {
                                    if let Some(input) = file_input.get() {
                                        input.click();
                                    }
                                }
                            >
                                <Camera attr:class="h-4 w-4" />
                                {move || if uploading.get() { "Mengupload..." } else { "Ganti Foto" }}
                            </button>
                            <Show when=move || avatar_error.get().is_some()>
                                <p class="text-error text-sm">{move || avatar_error.get().unwrap_or_default()}</p>
                            </Show>
                        </div>

                        <div class="divider"></div>

                        {move || if editing.get() {
                            view! {
                                <form on:submit=on_save class="space-y-2">
                                    <FormField id="profile-username" label="Username" value=form.username />
                                    <FormField id="profile-email" label="Email" value=form.email input_type="email" />
                                    <FormField id="profile-position" label="Jabatan" value=form.position />
                                    <FormField id="profile-phone" label="Nomor Telepon" value=form.phone input_type="tel" />
                                    <FormField id="profile-office" label="Kantor" value=form.office />
                                    <div class="flex justify-end gap-2 pt-4">
                                        <button type="button" class="btn" on:click=move |_| set_editing.set(false)>"Batal"</button>
                                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                            {move || if saving.get() { "Menyimpan..." } else { "Simpan" }}
                                        </button>
                                    </div>
                                </form>
                            }
                            .into_any()
                        } else {
                            let p = profile.get().unwrap_or_default();
                            view! {
                                <div class="grid gap-3 sm:grid-cols-2">
                                    <div><p class="text-sm opacity-60">"Username"</p><p class="font-medium">{p.username.clone()}</p></div>
                                    <div><p class="text-sm opacity-60">"Email"</p><p class="font-medium">{or_dash(&p.email)}</p></div>
                                    <div><p class="text-sm opacity-60">"Jabatan"</p><p class="font-medium">{or_dash(&p.position)}</p></div>
                                    <div><p class="text-sm opacity-60">"Nomor Telepon"</p><p class="font-medium">{or_dash(&p.phone)}</p></div>
                                    <div><p class="text-sm opacity-60">"Kantor"</p><p class="font-medium">{or_dash(&p.office)}</p></div>
                                </div>
                                <div class="card-actions justify-end pt-4">
                                    <button class="btn btn-primary gap-2" on:click=start_edit>
                                        <Pencil attr:class="h-4 w-4" /> "Edit Profil"
                                    </button>
                                    <button class="btn btn-error btn-outline gap-2" on:click=move |_| logout_open.set(true)>
                                        <LogOut attr:class="h-4 w-4" /> "Logout"
                                    </button>
                                </div>
                            }
                            .into_any()
                        }}
                    </div>
                </div>
            </Show>
        </div>

        <LogoutDialog open=logout_open />
    }
}
