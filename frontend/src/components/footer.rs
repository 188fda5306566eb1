use crate::config::OFFICE_NAME;
use chrono::Datelike;
use kejaksaan_shared::date::today_in_jakarta;
use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    let year = today_in_jakarta().year();

    view! {
        <footer class="footer footer-center p-4 bg-base-300 text-base-content">
            <aside>
                <p>{format!("© {year} {OFFICE_NAME}. Hak cipta dilindungi.")}</p>
            </aside>
        </footer>
    }
}
