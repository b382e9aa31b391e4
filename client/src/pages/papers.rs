//! Papers list, newest update first.

use leptos::prelude::*;
use strapi::Services;
use strapi::navigation::paper_path;
use strapi::types::{Paper, PapersPage as Page, display_date};

use crate::state::auth::AuthState;
use crate::state::papers::{EXCERPT_CHARS, excerpt, summary_line};
use crate::util::auth::sync_session;

#[component]
pub fn PapersPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let papers = LocalResource::new(move || {
        let services = services.clone();
        async move {
            let result = services.papers.list(None).await;
            sync_session(&services, auth);
            result
        }
    });

    view! {
        <section class="papers-page">
            <header class="papers-page__header">
                <h1>"Papers"</h1>
                <Show when=move || auth.get().is_authenticated()>
                    <a href="/papers/new" class="btn btn--primary">"+ New paper"</a>
                </Show>
            </header>
            <Suspense fallback=move || view! { <p class="page__loading">"Loading papers..."</p> }>
                {move || {
                    papers
                        .get()
                        .map(|result| match result {
                            Ok(page) => render_page(page).into_any(),
                            Err(e) => view! {
                                <div class="error-box">
                                    <h3>"Error loading papers"</h3>
                                    <p>{e.to_string()}</p>
                                    <button class="btn" on:click=move |_| papers.refetch()>"Try Again"</button>
                                </div>
                            }
                                .into_any(),
                        })
                }}
            </Suspense>
        </section>
    }
}

fn render_page(page: Page) -> impl IntoView {
    if page.nodes.is_empty() {
        return view! {
            <div class="papers-page__empty">
                <h3>"No papers found"</h3>
                <p>"There are no papers available at the moment."</p>
            </div>
        }
            .into_any();
    }
    let summary = summary_line(&page);
    view! {
        <div class="papers-page__grid">
            {page.nodes.into_iter().map(render_card).collect_view()}
        </div>
        <p class="papers-page__summary">{summary}</p>
    }
        .into_any()
}

fn render_card(paper: Paper) -> impl IntoView {
    let href = paper_path(&paper.document_id);
    let snippet = paper.content.as_deref().map(|c| excerpt(c, EXCERPT_CHARS));
    let published = paper.published_at.as_deref().map(display_date).unwrap_or_default();
    let updated = paper.updated_at.as_deref().map(display_date).unwrap_or_default();

    view! {
        <a class="paper-card" href=href>
            <h3 class="paper-card__title">{paper.title}</h3>
            {snippet.map(|s| view! { <p class="paper-card__excerpt">{s}</p> })}
            <div class="paper-card__meta">
                <span>"Published: " {published}</span>
                <span>"Updated: " {updated}</span>
            </div>
            <span class="paper-card__more">"View Details →"</span>
        </a>
    }
}
