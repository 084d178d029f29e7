//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::guarded::Guarded;
use crate::config::AppConfig;
use crate::pages::{
    admin_home::AdminHomePage, home::HomePage, landing::LandingPage, login::LoginPage, profile::ProfilePage,
};
use crate::session::SessionContext;
use crate::session::guard::RouteAccess;
use crate::session::store::SessionStore;

/// Root application component.
///
/// Provides the session context and sets up client-side routing. Route
/// paths must line up with `AppConfig::paths`, which the guard redirects
/// against.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::default();
    #[cfg(feature = "hydrate")]
    let store: Arc<dyn SessionStore> = Arc::new(crate::session::web::WebStore::new());
    #[cfg(not(feature = "hydrate"))]
    let store: Arc<dyn SessionStore> = Arc::new(crate::session::store::MemoryStore::new());

    let session = SessionContext::new(store, config);
    #[cfg(feature = "hydrate")]
    crate::session::notifier::install_dom_listeners(&session.notifier);
    provide_context(session);

    crate::util::theme::apply(crate::util::theme::read_preference());

    view! {
        <Stylesheet id="leptos" href="/pkg/railmadad.css"/>
        <Title text="Rail Madad"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("user-dashboard") view=UserDashboardRoute/>
                <Route path=StaticSegment("admin-dashboard") view=AdminDashboardRoute/>
                <Route path=StaticSegment("profile") view=ProfileRoute/>
            </Routes>
        </Router>
    }
}

#[component]
fn UserDashboardRoute() -> impl IntoView {
    view! {
        <Guarded access=RouteAccess::UserOnly>
            <HomePage/>
        </Guarded>
    }
}

#[component]
fn AdminDashboardRoute() -> impl IntoView {
    view! {
        <Guarded access=RouteAccess::AdminOnly>
            <AdminHomePage/>
        </Guarded>
    }
}

#[component]
fn ProfileRoute() -> impl IntoView {
    view! {
        <Guarded access=RouteAccess::AnyAuthenticated>
            <ProfilePage/>
        </Guarded>
    }
}
