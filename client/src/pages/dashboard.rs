//! Account dashboard for the signed-in user.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use strapi::navigation::PAPERS_PATH;
use strapi::types::{User, display_date_long};

use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

/// Profile summary. Redirects to `/` once auth has settled without a user.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    view! {
        <section class="dashboard-page">
            {move || {
                let state = auth.get();
                match state.user {
                    Some(user) => render_profile(user).into_any(),
                    None => view! { <p class="page__loading">"Loading your account..."</p> }.into_any(),
                }
            }}
        </section>
    }
}

fn render_profile(user: User) -> impl IntoView {
    let member_since = display_date_long(&user.created_at);
    let confirmed = if user.confirmed { "Yes" } else { "No" };

    view! {
        <header class="dashboard-page__header">
            <h1>"Welcome back, " {user.username.clone()}</h1>
            <a href=PAPERS_PATH class="btn btn--primary">"Browse papers"</a>
        </header>
        <dl class="dashboard-page__profile">
            <dt>"Email"</dt>
            <dd>{user.email}</dd>
            <dt>"Username"</dt>
            <dd>{user.username}</dd>
            <dt>"User ID"</dt>
            <dd>{user.id}</dd>
            <dt>"Email confirmed"</dt>
            <dd>{confirmed}</dd>
            <dt>"Sign-in provider"</dt>
            <dd>{user.provider}</dd>
            <dt>"Member since"</dt>
            <dd>{member_since}</dd>
        </dl>
    }
}
