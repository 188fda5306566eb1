use crate::auth::use_auth;
use crate::components::guard::Loading;
use crate::components::icons::{Calendar, Clock, RefreshCw};
use crate::config::{CLOCK_TICK, SCHEDULE_REFRESH};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::timer::poll;
use kejaksaan_shared::date::{format_clock, format_long, now_in_jakarta, today_in_jakarta};
use kejaksaan_shared::view_model::{ScheduleRow, schedule_rows};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Hearing board: every case sorted by date, with a live Jakarta clock.
#[component]
pub fn SchedulePage() -> impl IntoView {
    let auth = use_auth();

    let (rows, set_rows) = signal(Vec::<ScheduleRow>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (clock, set_clock) = signal(format_clock(now_in_jakarta().time()));
    let (today_label, set_today_label) = signal(format_long(today_in_jakarta()));

    let load = move || {
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            match api.list_cases(None).await {
                Ok(cases) => {
                    set_error.set(None);
                    set_rows.set(schedule_rows(cases, today_in_jakarta()));
                }
                Err(e) => {
                    log::warn!("[Schedule] refresh failed: {e}");
                    set_error.set(Some(e.user_message("Gagal memuat jadwal")));
                }
            }
            set_loading.set(false);
        });
    };

    load();
    poll(SCHEDULE_REFRESH, load).bind_to_owner();
    poll(CLOCK_TICK, move || {
        let now = now_in_jakarta();
        set_clock.set(format_clock(now.time()));
        set_today_label.set(format_long(now.date()));
    })
    .bind_to_owner();

    view! {
        <div class="max-w-6xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <div class="flex items-center gap-3">
                    <Calendar attr:class="h-8 w-8 text-primary" />
                    <div>
                        <h1 class="text-2xl font-bold">"Jadwal Sidang"</h1>
                        <p class="text-sm text-base-content/70">{move || today_label.get()}</p>
                    </div>
                </div>
                <div class="flex items-center gap-2">
                    <div class="badge badge-lg badge-neutral gap-2 font-mono">
                        <Clock attr:class="h-4 w-4" />
                        {move || clock.get()}
                        " WIB"
                    </div>
                    <button on:click=move |_| load() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                        <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                </div>
            </div>

            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error">{move || error.get().unwrap_or_default()}</div>
            </Show>

            {move || {
                if loading.get() && rows.with(Vec::is_empty) {
                    return view! { <Loading /> }.into_any();
                }
                if rows.with(Vec::is_empty) {
                    return view! {
                        <div class="text-center py-8 text-base-content/50">"Belum ada jadwal sidang."</div>
                    }
                    .into_any();
                }
                view! {
                    <div class="overflow-x-auto card bg-base-100 shadow-xl">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"No"</th>
                                    <th>"Tanggal"</th>
                                    <th>"Nama Kasus"</th>
                                    <th>"Kategori"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || rows.get()
                                    key=|row| (row.index, row.id.clone(), row.status)
                                    children=move |row| {
                                        let highlight = if row.is_today() { "bg-success/10 font-semibold" } else { "" };
                                        view! {
                                            <tr class=highlight>
                                                <td>{row.index}</td>
                                                <td>{row.date_label}</td>
                                                <td>
                                                    <Link route={AppRoute::CaseDetail { id: row.id }} class="link link-hover">
                                                        {row.title}
                                                    </Link>
                                                </td>
                                                <td><span class="badge badge-outline">{row.category}</span></td>
                                                <td><span class=row.status.badge_class()>{row.status.label()}</span></td>
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
    }
}
