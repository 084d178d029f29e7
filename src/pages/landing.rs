//! Root route: forwards to the home matching the resolved role.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::session::SessionContext;
use crate::session::role::UserType;

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    Effect::new(move || {
        let target = match session.user_type() {
            UserType::Admin => session.config.paths.admin_home.clone(),
            UserType::User => session.config.paths.user_home.clone(),
            UserType::Anonymous => session.config.paths.login.clone(),
        };
        navigate(&target, NavigateOptions::default());
    });

    view! {
        <div class="landing-page">
            <p>"Loading..."</p>
        </div>
    }
}
