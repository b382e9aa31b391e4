//! Public landing page. Signed-in visitors are redirected to the dashboard
//! by the server guard before this renders.

use leptos::prelude::*;
use strapi::navigation::{PAPERS_PATH, SIGN_IN_PATH};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="home">
            <h1>"Research Hub"</h1>
            <p class="home__lede">"Read, write and share research papers."</p>
            <div class="home__actions">
                <a href=SIGN_IN_PATH class="btn btn--primary">"Sign in or register"</a>
                <a href=PAPERS_PATH class="btn">"Browse papers"</a>
            </div>
        </section>
    }
}
