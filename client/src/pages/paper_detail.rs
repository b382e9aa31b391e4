//! Paper detail page with in-place editing and deletion for the author.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use strapi::Services;
use strapi::navigation::{Navigation, PAPERS_PATH};
use strapi::papers::is_author;
use strapi::types::{PaperDetail, display_date_long};

use crate::state::auth::AuthState;
use crate::state::papers::EditDraft;
use crate::util::auth::sync_session;
use crate::util::dialog::confirm;

#[component]
pub fn PaperDetailPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();

    let paper = LocalResource::new(move || {
        let services = services.clone();
        let id = params.read().get("id").unwrap_or_default();
        async move {
            let result = services.papers.get(&id).await;
            sync_session(&services, auth);
            result
        }
    });

    view! {
        <section class="paper-page">
            <a href=PAPERS_PATH class="paper-page__back">"← Back to papers"</a>
            <Suspense fallback=move || view! { <p class="page__loading">"Loading paper..."</p> }>
                {move || {
                    paper
                        .get()
                        .map(|result| match result {
                            Ok(detail) => view! { <PaperView paper=detail/> }.into_any(),
                            Err(e) => view! {
                                <div class="error-box">
                                    <h3>"Paper unavailable"</h3>
                                    <p>{e.to_string()}</p>
                                </div>
                            }
                                .into_any(),
                        })
                }}
            </Suspense>
        </section>
    }
}

/// Read view, switching to an editor for the author. The editor closes only
/// once the server confirms the update.
#[component]
fn PaperView(paper: PaperDetail) -> impl IntoView {
    let services = expect_context::<Services>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let current = RwSignal::new(paper);
    let editing = RwSignal::new(false);
    let draft = RwSignal::new(EditDraft::default());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let can_edit = move || current.with(|p| is_author(p, auth.get().user.as_ref()));

    let on_edit = move |_| {
        draft.set(EditDraft::from_paper(&current.get_untracked()));
        error.set(String::new());
        editing.set(true);
    };

    let save_services = services.clone();
    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let original = current.get_untracked();
        let changes = draft.get_untracked().changes(&original);
        if changes.is_empty() {
            editing.set(false);
            return;
        }
        busy.set(true);
        error.set(String::new());
        let services = save_services.clone();
        leptos::task::spawn_local(async move {
            match services.papers.update(&original.document_id, &changes).await {
                Ok(updated) => {
                    current.set(updated);
                    editing.set(false);
                }
                Err(e) => error.set(e.to_string()),
            }
            busy.set(false);
            sync_session(&services, auth);
        });
    };

    let on_delete = move |_| {
        if busy.get() || !confirm("Are you sure you want to delete this paper?") {
            return;
        }
        busy.set(true);
        error.set(String::new());
        let services = services.clone();
        let navigate = navigate.clone();
        let id = current.with_untracked(|p| p.document_id.clone());
        leptos::task::spawn_local(async move {
            match services.papers.delete(&id).await {
                Ok(()) => navigate(Navigation::Papers.path(), NavigateOptions::default()),
                Err(e) => {
                    error.set(e.to_string());
                    busy.set(false);
                }
            }
            sync_session(&services, auth);
        });
    };

    view! {
        <article class="paper">
            <Show
                when=move || editing.get()
                fallback=move || {
                    let p = current.get();
                    let author = p.author_name().unwrap_or("Unknown author").to_owned();
                    let published = p.published_at.as_deref().map(display_date_long);
                    let updated = p.updated_at.as_deref().map(display_date_long);
                    view! {
                        <h1 class="paper__title">{p.title}</h1>
                        <p class="paper__byline">"By " {author}</p>
                        <div class="paper__meta">
                            {published.map(|d| view! { <span>"Published " {d}</span> })}
                            {updated.map(|d| view! { <span>"Updated " {d}</span> })}
                        </div>
                        <div class="paper__content">{p.content.unwrap_or_default()}</div>
                    }
                }
            >
                <form class="paper-form" on:submit=on_save.clone()>
                    <input
                        class="paper-form__title"
                        type="text"
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                    <textarea
                        class="paper-form__content"
                        rows="16"
                        prop:value=move || draft.with(|d| d.content.clone())
                        on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
                    ></textarea>
                    <div class="paper-form__actions">
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Saving..." } else { "Save" }}
                        </button>
                        <button class="btn" type="button" on:click=move |_| editing.set(false)>"Cancel"</button>
                    </div>
                </form>
            </Show>
            <Show when=move || can_edit() && !editing.get()>
                <div class="paper__actions">
                    <button class="btn" on:click=on_edit>"Edit"</button>
                    <button class="btn btn--danger" disabled=move || busy.get() on:click=on_delete.clone()>
                        "Delete"
                    </button>
                </div>
            </Show>
            <Show when=move || !error.get().is_empty()>
                <p class="paper__error">{move || error.get()}</p>
            </Show>
        </article>
    }
}
