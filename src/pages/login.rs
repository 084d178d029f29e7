//! Login page: email + password sign-in with password-reset request.

use leptos::prelude::*;

use crate::session::SessionContext;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let session_sign_in = session.clone();
    let on_sign_in = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if email_value.is_empty() || password_value.is_empty() {
            info.set("Enter both email and password.".to_owned());
            return;
        }
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let session = session_sign_in.clone();
            leptos::task::spawn_local(async move {
                let provider = crate::net::identity::FirebaseAuth::new(session.config.firebase_api_key.clone());
                match crate::session::mutators::login(
                    &provider,
                    &*session.store,
                    &session.notifier,
                    &session.config,
                    &email_value,
                    &password_value,
                )
                .await
                {
                    Ok(outcome) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&outcome.redirect);
                        }
                    }
                    Err(e) => {
                        info.set(format!("Sign-in failed: {e}"));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session_sign_in, email_value, password_value);
        }
    };

    let session_reset = session.clone();
    let on_reset_password = move |_| {
        let email_value = email.get().trim().to_owned();
        if email_value.is_empty() {
            info.set("Enter your email first.".to_owned());
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let session = session_reset.clone();
            leptos::task::spawn_local(async move {
                let provider = crate::net::identity::FirebaseAuth::new(session.config.firebase_api_key.clone());
                match crate::session::mutators::request_password_reset(&provider, &email_value).await {
                    Ok(()) => info.set("Password reset email sent.".to_owned()),
                    Err(e) => info.set(format!("Reset request failed: {e}")),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session_reset, email_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Rail Madad"</h1>
                <p class="login-card__subtitle">"Sign in to file and track complaints"</p>
                <form class="login-form" on:submit=on_sign_in>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <button class="login-link" on:click=on_reset_password disabled=move || busy.get()>
                    "Forgot password?"
                </button>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
