use crate::components::icons::{BarChart, ChevronLeft, Layers, Scale, Search};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use kejaksaan_shared::CaseCategory;
use leptos::prelude::*;

fn category_card(category: CaseCategory) -> (&'static str, AnyView) {
    match category {
        CaseCategory::Penyelidikan => {
            ("bg-success", view! { <Search attr:class="h-10 w-10" /> }.into_any())
        }
        CaseCategory::Penyidikan => {
            ("bg-info", view! { <BarChart attr:class="h-10 w-10" /> }.into_any())
        }
        CaseCategory::Penuntutan => {
            ("bg-warning", view! { <Scale attr:class="h-10 w-10" /> }.into_any())
        }
        CaseCategory::Eksekusi => {
            ("bg-error", view! { <Layers attr:class="h-10 w-10" /> }.into_any())
        }
    }
}

#[component]
pub fn CategoryPage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="max-w-6xl mx-auto p-4 md:p-8 space-y-6">
            <button class="btn btn-ghost gap-2" on:click=move |_| router.go(AppRoute::UserHome)>
                <ChevronLeft attr:class="h-4 w-4" /> "Kembali ke Dashboard"
            </button>
            <h1 class="text-3xl font-bold text-center">"Semua Kategori Kasus"</h1>

            <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-4">
                {CaseCategory::ALL
                    .into_iter()
                    .map(|category| {
                        let (color, icon) = category_card(category);
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class=format!("{color} text-white rounded-t-2xl flex justify-center py-6")>
                                    {icon}
                                </div>
                                <div class="card-body items-center text-center">
                                    <h2 class="card-title">{category.title()}</h2>
                                    <div class="card-actions">
                                        <Link route={AppRoute::CaseList { category }} class="btn btn-primary btn-sm">
                                            "Lihat Detail"
                                        </Link>
                                    </div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
