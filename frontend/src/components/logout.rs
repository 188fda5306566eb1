use crate::auth::{sign_out, use_auth};
use crate::avatar::use_avatar;
use crate::components::modal::Modal;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Logout confirmation. Confirming always ends the local session, even when
/// the backend call fails.
#[component]
pub fn LogoutDialog(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let avatar = use_avatar();

    let on_confirm = move |_| {
        open.set(false);
        avatar.clear();
        spawn_local(sign_out(auth));
    };

    view! {
        <Modal open=open title="Konfirmasi Logout">
            <p class="text-base-content/70">"Apakah Anda yakin ingin keluar dari akun Anda?"</p>
            <div class="modal-action">
                <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                    "Batal"
                </button>
                <button type="button" class="btn btn-primary" on:click=on_confirm>
                    "Ya, Keluar"
                </button>
            </div>
        </Modal>
    }
}
