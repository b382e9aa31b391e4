//! Top navigation bar.

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use strapi::Services;
use strapi::navigation::{DASHBOARD_PATH, PAPERS_PATH, SIGN_IN_PATH};

use crate::state::auth::AuthState;
use crate::util::auth::hard_navigate;

/// Brand plus sign-in link when anonymous; section links, greeting and
/// logout when signed in.
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let services = expect_context::<Services>();
    let location = use_location();

    let link_class = move |href: &'static str| {
        move || {
            if location.pathname.get().starts_with(href) {
                "navbar__link navbar__link--current"
            } else {
                "navbar__link"
            }
        }
    };

    let on_logout = move |_| {
        let next = services.auth.logout();
        auth.set(services.auth.snapshot().into());
        hard_navigate(next.path());
    };

    view! {
        <nav class="navbar">
            <a href=move || if auth.get().is_authenticated() { DASHBOARD_PATH } else { "/" } class="navbar__brand">
                "Research Hub"
            </a>
            <Show
                when=move || auth.get().is_authenticated()
                fallback=move || {
                    view! {
                        <div class="navbar__links">
                            <a href=PAPERS_PATH class=link_class(PAPERS_PATH)>"Papers"</a>
                            <Show when=move || !auth.get().loading>
                                <a href=SIGN_IN_PATH class="navbar__link">"Sign in"</a>
                            </Show>
                        </div>
                    }
                }
            >
                <div class="navbar__links">
                    <a href=PAPERS_PATH class=link_class(PAPERS_PATH)>"Papers"</a>
                    <a href=DASHBOARD_PATH class=link_class(DASHBOARD_PATH)>"Dashboard"</a>
                </div>
                <div class="navbar__user">
                    <span>"Welcome, " {move || auth.get().username().unwrap_or_default().to_owned()}</span>
                    <button class="navbar__logout" on:click=on_logout.clone()>"Logout"</button>
                </div>
            </Show>
        </nav>
    }
}
