//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page applies the same rules: auth transitions reload the page so the
//! server-side guard sees the new cookie, and a 401 anywhere sends the user
//! to sign-in exactly once.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use strapi::Services;
use strapi::navigation::HOME_PATH;

use crate::state::auth::AuthState;

/// Whether a protected page should send the visitor away. Never true while
/// the first session check is still running.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Redirect to `/` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(HOME_PATH, NavigateOptions::default());
        }
    });
}

/// Full page load of `path`.
pub fn hard_navigate(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(path).is_err() {
                tracing::warn!(%path, "navigation refused");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
    }
}

/// Publish the current session to the view tree and follow a pending 401
/// redirect. Call after every service request.
pub fn sync_session(services: &Services, auth: RwSignal<AuthState>) {
    if let Some(next) = services.auth.take_redirect() {
        auth.set(services.auth.snapshot().into());
        hard_navigate(next.path());
        return;
    }
    let snapshot: AuthState = services.auth.snapshot().into();
    if auth.get_untracked() != snapshot {
        auth.set(snapshot);
    }
}
