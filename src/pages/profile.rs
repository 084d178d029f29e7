//! Profile page: account details and account deletion.
//!
//! Deletion re-authenticates first; a failed credential check aborts
//! before anything is deleted and keeps the session intact.

use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::session::SessionContext;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<SessionContext>();

    // Stored email first, backend profile details once they arrive.
    let email = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    {
        let session = session.clone();
        Effect::new(move || {
            if email.get_untracked().is_empty() {
                if let Some(current) = session.snapshot().0.email {
                    email.set(current);
                }
            }
        });
    }
    #[cfg(feature = "hydrate")]
    {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_profile(&session.config, &*session.store, &session.notifier).await {
                Ok(profile) => {
                    if !profile.email.is_empty() {
                        email.set(profile.email);
                    }
                    name.set(profile.name.unwrap_or_default());
                    phone.set(profile.phone.unwrap_or_default());
                }
                Err(e) => log::warn!("profile fetch failed: {e}"),
            }
        });
    }

    let show_delete = RwSignal::new(false);
    let password = RwSignal::new(String::new());
    let deleting = RwSignal::new(false);
    let error = RwSignal::new(String::new());

    let session_delete = session.clone();
    let on_confirm_delete = move |_| {
        if deleting.get() {
            return;
        }
        let password_value = password.get();
        if password_value.is_empty() {
            error.set("Enter your password to confirm.".to_owned());
            return;
        }
        deleting.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let session = session_delete.clone();
            leptos::task::spawn_local(async move {
                let provider = crate::net::identity::FirebaseAuth::new(session.config.firebase_api_key.clone());
                match crate::session::mutators::delete_account(
                    &provider,
                    &*session.store,
                    &session.notifier,
                    &session.config,
                    &password_value,
                )
                .await
                {
                    Ok(()) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&session.config.paths.login);
                        }
                    }
                    Err(e) => {
                        error.set(format!("Account deletion failed: {e}"));
                        deleting.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session_delete, password_value);
        }
    };

    view! {
        <div class="profile-page">
            <Navbar/>
            <main class="profile-page__content">
                <h2>"Profile"</h2>
                <Show when=move || !name.get().is_empty()>
                    <p class="profile-page__name">{move || name.get()}</p>
                </Show>
                <p class="profile-page__email">{move || email.get()}</p>
                <Show when=move || !phone.get().is_empty()>
                    <p class="profile-page__phone">{move || phone.get()}</p>
                </Show>

                <section class="profile-page__danger">
                    <h3>"Delete Account"</h3>
                    <p>"This permanently removes your account and complaints."</p>
                    <button class="btn btn--danger" on:click=move |_| show_delete.set(true)>
                        "Delete my account"
                    </button>
                </section>

                <Show when=move || show_delete.get()>
                    <div class="dialog-backdrop" on:click=move |_| show_delete.set(false)>
                        <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                            <h2>"Confirm Deletion"</h2>
                            <p class="dialog__danger">"Re-enter your password to continue."</p>
                            <input
                                class="dialog__input"
                                type="password"
                                placeholder="Password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                            <Show when=move || !error.get().is_empty()>
                                <p class="dialog__error">{move || error.get()}</p>
                            </Show>
                            <div class="dialog__actions">
                                <button class="btn" on:click=move |_| show_delete.set(false)>
                                    "Cancel"
                                </button>
                                <button
                                    class="btn btn--danger"
                                    on:click=on_confirm_delete.clone()
                                    disabled=move || deleting.get()
                                >
                                    "Delete"
                                </button>
                            </div>
                        </div>
                    </div>
                </Show>
            </main>
        </div>
    }
}
