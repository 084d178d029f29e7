//! Route guard wrapper component.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps route content with the guard decision of `session::guard`. The
//! decision is computed once at mount and again on every change
//! notification, so logout in another tab or a forced 401 clear bounces
//! the user without a navigation of their own.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::session::SessionContext;
use crate::session::guard::{GuardDecision, RouteAccess, decide};
use crate::session::role::UserType;

/// Render `children` only when the resolved role satisfies `access`;
/// otherwise redirect per the guard matrix. Shows a loading placeholder
/// until the first resolution completes, so no redirect is ever decided
/// from a default record during boot.
#[component]
pub fn Guarded(access: RouteAccess, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    // None until the first get()+resolve completes: the boot pseudo-state.
    let resolved = RwSignal::new(None::<UserType>);

    {
        let session = session.clone();
        let subscription = session.notifier.clone().subscribe(move || {
            resolved.set(Some(session.user_type()));
        });
        on_cleanup(move || subscription.cancel());
    }

    let session_mount = session.clone();
    Effect::new(move || {
        if resolved.get_untracked().is_none() {
            resolved.set(Some(session_mount.user_type()));
        }
    });

    let redirect_paths = session.config.paths.clone();
    Effect::new(move || {
        let Some(user_type) = resolved.get() else {
            return;
        };
        if let GuardDecision::Redirect(path) = decide(access, user_type, &redirect_paths) {
            navigate(&path, NavigateOptions::default());
        }
    });

    let render_paths = session.config.paths.clone();
    let should_render = move || {
        resolved
            .get()
            .is_some_and(|user_type| matches!(decide(access, user_type, &render_paths), GuardDecision::Render))
    };

    view! {
        <Show
            when=should_render
            fallback=move || {
                view! {
                    <div class="guard-pending">
                        <p>{move || if resolved.get().is_none() { "Loading..." } else { "Redirecting..." }}</p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
