//! New paper editor.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use strapi::Services;
use strapi::navigation::{Navigation, SIGN_IN_PATH};

use crate::state::auth::AuthState;
use crate::state::papers::new_paper_input;
use crate::util::auth::sync_session;

#[component]
pub fn NewPaperPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(String::new());
        let services = services.clone();
        let navigate = navigate.clone();
        let input = new_paper_input(&title.get(), &content.get());
        leptos::task::spawn_local(async move {
            match services.papers.create(&input).await {
                Ok(_) => navigate(Navigation::Papers.path(), NavigateOptions::default()),
                Err(e) => {
                    error.set(e.to_string());
                    busy.set(false);
                }
            }
            sync_session(&services, auth);
        });
    };

    view! {
        <section class="paper-page">
            <h1>"New paper"</h1>
            <Show
                when=move || auth.get().is_authenticated()
                fallback=move || view! {
                    <p class="page__notice">
                        <a href=SIGN_IN_PATH>"Sign in"</a>
                        " to write a paper."
                    </p>
                }
            >
                <form class="paper-form" on:submit=on_submit.clone()>
                    <input
                        class="paper-form__title"
                        type="text"
                        placeholder="Title"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <textarea
                        class="paper-form__content"
                        rows="16"
                        placeholder="Write your paper..."
                        prop:value=move || content.get()
                        on:input=move |ev| content.set(event_target_value(&ev))
                    ></textarea>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Publishing..." } else { "Publish" }}
                    </button>
                </form>
            </Show>
            <Show when=move || !error.get().is_empty()>
                <p class="paper__error">{move || error.get()}</p>
            </Show>
        </section>
    }
}
