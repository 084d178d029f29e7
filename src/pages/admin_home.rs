//! Admin dashboard: aggregated complaint counters.

use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::net::types::DashboardStats;
use crate::session::SessionContext;

#[component]
pub fn AdminHomePage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let stats = RwSignal::new(DashboardStats::default());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_dashboard_stats(&session.config, &*session.store, &session.notifier).await {
                Ok(fetched) => stats.set(fetched),
                Err(e) => error.set(format!("Could not load stats: {e}")),
            }
            loading.set(false);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    loading.set(false);

    let _ = session;

    view! {
        <div class="admin-page">
            <Navbar/>
            <main class="admin-page__content">
                <h2>"Complaint Overview"</h2>
                <Show when=move || !error.get().is_empty()>
                    <p class="admin-page__error">{move || error.get()}</p>
                </Show>
                <Show
                    when=move || !loading.get()
                    fallback=move || view! { <p>"Loading stats..."</p> }
                >
                    <div class="admin-page__cards">
                        <StatCard label="Total" value=Signal::derive(move || stats.get().total)/>
                        <StatCard label="Pending" value=Signal::derive(move || stats.get().pending)/>
                        <StatCard label="In Progress" value=Signal::derive(move || stats.get().in_progress)/>
                        <StatCard label="Resolved" value=Signal::derive(move || stats.get().resolved)/>
                    </div>
                </Show>
            </main>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: Signal<u64>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__value">{move || value.get()}</span>
            <span class="stat-card__label">{label}</span>
        </div>
    }
}
