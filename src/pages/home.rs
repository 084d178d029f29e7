//! Passenger home: file a complaint and see your own complaints.

use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::net::types::{Complaint, NewComplaint};
use crate::session::SessionContext;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let complaints = RwSignal::new(Vec::<Complaint>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(String::new());

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    // Initial fetch.
    #[cfg(feature = "hydrate")]
    {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_complaints(&session.config, &*session.store, &session.notifier).await {
                Ok(items) => complaints.set(items),
                Err(e) => error.set(format!("Could not load complaints: {e}")),
            }
            loading.set(false);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    loading.set(false);

    let session_submit = session.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        let title_value = title.get().trim().to_owned();
        let description_value = description.get().trim().to_owned();
        if title_value.is_empty() || description_value.is_empty() {
            error.set("Enter a title and a description.".to_owned());
            return;
        }
        submitting.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let session = session_submit.clone();
            leptos::task::spawn_local(async move {
                let complaint = NewComplaint {
                    title: title_value,
                    description: description_value,
                    ..NewComplaint::default()
                };
                match crate::net::api::submit_complaint(&session.config, &*session.store, &session.notifier, &complaint)
                    .await
                {
                    Ok(created) => {
                        complaints.update(|items| items.insert(0, created));
                        title.set(String::new());
                        description.set(String::new());
                    }
                    Err(e) => error.set(format!("Could not file complaint: {e}")),
                }
                submitting.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session_submit, title_value, description_value);
        }
    };

    let _ = session;

    view! {
        <div class="home-page">
            <Navbar/>
            <main class="home-page__content">
                <section class="home-page__new">
                    <h2>"File a Complaint"</h2>
                    <form class="complaint-form" on:submit=on_submit>
                        <input
                            class="complaint-form__input"
                            type="text"
                            placeholder="Short title"
                            prop:value=move || title.get()
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                        <textarea
                            class="complaint-form__input"
                            placeholder="Describe the issue"
                            prop:value=move || description.get()
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                        <button class="btn btn--primary" type="submit" disabled=move || submitting.get()>
                            "Submit"
                        </button>
                    </form>
                </section>

                <section class="home-page__list">
                    <h2>"Your Complaints"</h2>
                    <Show when=move || !error.get().is_empty()>
                        <p class="home-page__error">{move || error.get()}</p>
                    </Show>
                    <Show
                        when=move || !loading.get()
                        fallback=move || view! { <p>"Loading complaints..."</p> }
                    >
                        <ul class="complaint-list">
                            {move || {
                                complaints
                                    .get()
                                    .into_iter()
                                    .map(|c| {
                                        view! {
                                            <li class="complaint-list__item">
                                                <span class="complaint-list__title">{c.title}</span>
                                                <span class="complaint-list__status">{c.status.label()}</span>
                                            </li>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </ul>
                    </Show>
                </section>
            </main>
        </div>
    }
}
