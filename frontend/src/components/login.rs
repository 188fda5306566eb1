use crate::auth::use_auth;
use crate::avatar::use_avatar;
use crate::components::icons::Scale;
use crate::components::modal::Modal;
use crate::config::OFFICE_NAME;
use leptos::prelude::*;
use leptos::task::spawn_local;

const LOGIN_FAILED: &str = "Email atau password salah";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let avatar = use_avatar();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // Stored but not yet handed to the shell while the welcome dialog is open.
    let greeted = RwSignal::new(Option::<String>::None);
    let welcome_open = RwSignal::new(false);

    // Landing here always ends whatever session the tab had.
    Effect::new(move |_| {
        auth.logout();
        avatar.clear();
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = auth.api();
        let store = auth.store();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        spawn_local(async move {
            match api.login(&email, &password).await {
                Ok(session) => {
                    // The profile call needs the token in place.
                    store.set_session(&session);
                    match api.get_profile().await {
                        Ok(profile) => avatar.set(profile.avatar_url),
                        Err(e) => log::debug!("[Login] profile unavailable: {e}"),
                    }
                    greeted.set(session.username);
                    welcome_open.set(true);
                }
                Err(e) => {
                    log::info!("[Login] failed: {}", e.error_code());
                    store.clear_session();
                    set_error_msg.set(Some(e.user_message(LOGIN_FAILED)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    // Closing the dialog (button, Esc or backdrop) finishes the login.
    Effect::new(move |was_open: Option<bool>| {
        let open = welcome_open.get();
        if was_open == Some(true) && !open {
            match auth.store().get_session() {
                Some(session) => auth.login(&session),
                None => log::warn!("[Login] session gone before the welcome closed"),
            }
        }
        open
    });

    let welcome_name = move || greeted.get().unwrap_or_else(|| "Pengguna".to_string());

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Scale attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Login"</h1>
                        <p class="text-base-content/70">{OFFICE_NAME}</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Alamat Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                autocomplete="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                prop:disabled=is_submitting
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Kata Sandi"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                prop:disabled=is_submitting
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    "Masuk".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <p class="text-sm text-center text-base-content/60">
                    "Gunakan akun yang telah didaftarkan atau hubungi admin untuk membuat akun baru."
                </p>
            </div>
        </div>

        <Modal open=welcome_open title="Selamat Datang!" class="text-center">
            <p class="text-xl mb-2">"Halo, " {welcome_name}</p>
            <p class="text-base-content/70">"Senang bertemu dengan Anda kembali di sistem kami."</p>
            <div class="modal-action justify-center">
                <button class="btn btn-primary" on:click=move |_| welcome_open.set(false)>
                    "Lanjutkan"
                </button>
            </div>
        </Modal>
    }
}
