//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::pages::{
    auth::AuthPage, dashboard::DashboardPage, forgot_password::ForgotPasswordPage, home::HomePage,
    paper_detail::PaperDetailPage, paper_new::NewPaperPage, papers::PapersPage,
};
use crate::state::auth::AuthState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the service graph once per page load, provides it with the
/// reactive auth state, and keeps the session fresh on window focus.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let services = crate::net::browser_services();
    let auth = RwSignal::new(AuthState::default());

    provide_context(services.clone());
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    {
        use strapi::session::Revalidate;

        let on_mount = services.clone();
        Effect::new(move || {
            let services = on_mount.clone();
            leptos::task::spawn_local(async move {
                services.auth.hydrate().await;
                crate::util::auth::sync_session(&services, auth);
            });
        });

        let on_focus = services.clone();
        let _focus = window_event_listener(leptos::ev::focus, move |_| {
            let services = on_focus.clone();
            leptos::task::spawn_local(async move {
                services.auth.revalidate(Revalidate::Focus).await;
                crate::util::auth::sync_session(&services, auth);
            });
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/papers.css"/>
        <Title text="Research Hub"/>

        <Router>
            <Navbar/>
            <main class="page">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("auth") view=AuthPage/>
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("papers") view=PapersPage/>
                    <Route path=(StaticSegment("papers"), StaticSegment("new")) view=NewPaperPage/>
                    <Route path=(StaticSegment("papers"), ParamSegment("id")) view=PaperDetailPage/>
                </Routes>
            </main>
        </Router>
    }
}
