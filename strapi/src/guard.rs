//! Route guard: a pure decision over the request path and token presence.
//!
//! Presence only. Whether the token is still valid is discovered later, when
//! it is used against the API and answers 401.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::credentials::{TOKEN_KEY, cookie_value};
use crate::navigation::{DASHBOARD_PATH, HOME_PATH, SIGN_IN_PATH};

/// Paths that require a session.
pub const PROTECTED_PREFIXES: &[&str] = &[DASHBOARD_PATH];

/// Paths only meaningful without a session.
pub const AUTH_ONLY_PREFIXES: &[&str] = &[SIGN_IN_PATH, "/login", "/register"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectHome,
    RedirectLanding,
}

impl GuardDecision {
    /// Redirect target, if any.
    #[must_use]
    pub fn location(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectHome => Some(HOME_PATH),
            Self::RedirectLanding => Some(DASHBOARD_PATH),
        }
    }
}

/// Rules apply in order; the first match wins.
#[must_use]
pub fn evaluate(path: &str, has_token: bool) -> GuardDecision {
    if path == HOME_PATH && has_token {
        return GuardDecision::RedirectLanding;
    }
    if !has_token && matches_any(path, PROTECTED_PREFIXES) {
        return GuardDecision::RedirectHome;
    }
    if has_token && matches_any(path, AUTH_ONLY_PREFIXES) {
        return GuardDecision::RedirectLanding;
    }
    GuardDecision::Allow
}

fn matches_any(path: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix))
}

/// Session token carried by a request: the `jwt` cookie, else a bearer
/// `Authorization` header.
#[must_use]
pub fn token_from_request<'a>(cookie_header: Option<&'a str>, authorization: Option<&'a str>) -> Option<&'a str> {
    cookie_header
        .and_then(|header| cookie_value(header, TOKEN_KEY))
        .or_else(|| {
            authorization
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|token| !token.is_empty())
        })
}
