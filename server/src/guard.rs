//! Route guard middleware.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before Leptos renders a page so a protected page is never sent to a
//! visitor without a session cookie, and signed-in visitors skip the landing
//! and sign-in pages. Static assets and API paths bypass the guard.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use strapi::guard::{self, GuardDecision};

const PASSTHROUGH_PREFIXES: &[&str] = &["/api/", "/pkg/", "/_next/", "/healthz"];
const ASSET_EXTENSIONS: &[&str] = &["ico", "svg", "png", "jpg", "jpeg", "gif", "webp", "css", "js", "wasm"];

/// Paths the guard never looks at.
pub(crate) fn is_passthrough(path: &str) -> bool {
    if PASSTHROUGH_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) || path == "/api" {
        return true;
    }
    path.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Whether the request carries a session token (cookie first, then bearer).
///
/// HTTP/2 clients may split cookies over several `Cookie` headers; they are
/// joined back into one list before parsing.
pub(crate) fn has_token(headers: &HeaderMap) -> bool {
    let cookies = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    guard::token_from_request(Some(cookies.as_str()), authorization).is_some()
}

pub async fn route_guard(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if is_passthrough(&path) {
        return next.run(request).await;
    }

    let decision = guard::evaluate(&path, has_token(request.headers()));

    match decision {
        GuardDecision::Allow => next.run(request).await,
        redirect => {
            let location = redirect.location().unwrap_or("/");
            tracing::debug!(%path, %location, ?redirect, "route guard redirect");
            Redirect::temporary(location).into_response()
        }
    }
}
