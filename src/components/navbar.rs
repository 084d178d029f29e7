//! Top navigation bar with theme toggle and logout.

use leptos::prelude::*;

use crate::session::SessionContext;
use crate::session::role::UserType;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let dark = RwSignal::new(crate::util::theme::read_preference());

    // Refreshed at mount and on every session change notification.
    let identity = RwSignal::new(String::new());
    let describe = |session: &SessionContext| {
        let (record, user_type) = session.snapshot();
        let email = record.email.unwrap_or_else(|| "guest".to_owned());
        let role = match user_type {
            UserType::Admin => "admin",
            UserType::User => "passenger",
            UserType::Anonymous => "guest",
        };
        format!("{email} ({role})")
    };
    {
        let session = session.clone();
        let subscription = session.notifier.subscribe({
            let session = session.clone();
            move || identity.set(describe(&session))
        });
        on_cleanup(move || subscription.cancel());
    }
    let session_mount = session.clone();
    Effect::new(move || {
        if identity.get_untracked().is_empty() {
            identity.set(describe(&session_mount));
        }
    });

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                let provider = crate::net::identity::FirebaseAuth::new(session.config.firebase_api_key.clone());
                crate::session::mutators::logout(&provider, &*session.store, &session.notifier).await;
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href(&session.config.paths.login);
                }
            });
        }
    };

    view! {
        <header class="navbar">
            <span class="navbar__brand">"Rail Madad"</span>
            <span class="navbar__spacer"></span>
            <button
                class="btn navbar__theme-toggle"
                on:click=move |_| {
                    let next = crate::util::theme::toggle(dark.get());
                    dark.set(next);
                }
                title="Toggle dark theme"
            >
                {move || if dark.get() { "☀" } else { "☾" }}
            </button>
            <span class="navbar__identity">{move || identity.get()}</span>
            <button class="btn navbar__logout" on:click=on_logout title="Logout">
                "Logout"
            </button>
        </header>
    }
}
