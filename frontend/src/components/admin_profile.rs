use crate::auth::use_auth;
use crate::components::icons::{LogOut, Pencil, ShieldCheck};
use crate::components::logout::LogoutDialog;
use crate::notify::use_notifier;
use leptos::prelude::*;

/// The admin's display name lives only in the persistent store.
#[component]
pub fn AdminProfilePage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let name = move || auth.username().unwrap_or_else(|| "Admin".to_string());
    let (editing, set_editing) = signal(false);
    let draft = RwSignal::new(String::new());
    let logout_open = RwSignal::new(false);

    let start_edit = move |_| {
        draft.set(name());
        set_editing.set(true);
    };

    let save = move |_| {
        let value = draft.get_untracked().trim().to_string();
        if value.is_empty() {
            notifier.error("Nama tidak boleh kosong");
            return;
        }
        auth.set_username(&value);
        set_editing.set(false);
        notifier.success("Nama berhasil diperbarui");
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h1 class="card-title text-2xl">"Profil Admin"</h1>
                    <div class="divider my-2"></div>
                    {move || if editing.get() {
                        view! {
                            <label class="form-control w-full">
                                <div class="label"><span class="label-text">"Nama"</span></div>
                                <input
                                    type="text"
                                    class="input input-bordered w-full"
                                    prop:value=move || draft.get()
                                    on:input=move |ev| draft.set(event_target_value(&ev))
                                />
                            </label>
                        }
                        .into_any()
                    } else {
                        view! { <p class="text-lg font-semibold">"Nama: " {name}</p> }.into_any()
                    }}
                    <p class="flex items-center gap-2"><ShieldCheck attr:class="h-4 w-4 text-primary" /> "Peran: Admin"</p>
                    <div class="card-actions justify-end pt-4">
                        {move || if editing.get() {
                            view! {
                                <button class="btn btn-primary" on:click=save>"Simpan"</button>
                                <button class="btn btn-outline" on:click=move |_| set_editing.set(false)>"Batal"</button>
                            }
                            .into_any()
                        } else {
                            view! {
                                <button class="btn btn-primary gap-2" on:click=start_edit>
                                    <Pencil attr:class="h-4 w-4" /> "Edit Profil"
                                </button>
                                <button class="btn btn-error btn-outline gap-2" on:click=move |_| logout_open.set(true)>
                                    <LogOut attr:class="h-4 w-4" /> "Logout"
                                </button>
                            }
                            .into_any()
                        }}
                    </div>
                </div>
            </div>
        </div>

        <LogoutDialog open=logout_open />
    }
}
