//! Credential Store contract and the cookie medium shared by every build.
//!
//! DESIGN
//! ======
//! The token and the cached profile live under fixed keys (`jwt`, `user`) in a
//! single medium. The browser store writes them as cookies so the server-side
//! route guard sees the same token; the helpers below are the one place that
//! knows the cookie format.
//!
//! A cached profile is only meaningful next to a token: [`CredentialStore::profile`]
//! returns `None` whenever the token is missing.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::sync::{Mutex, PoisonError};

use crate::types::User;

pub const TOKEN_KEY: &str = "jwt";
pub const USER_KEY: &str = "user";
pub const COOKIE_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

/// Persistence for the session token and the cached user profile.
///
/// Calls are synchronous. Implementations without a client context (server
/// rendering) read as empty and ignore writes.
pub trait CredentialStore: Send + Sync {
    fn set_token(&self, token: &str);
    fn token(&self) -> Option<String>;
    fn set_user(&self, user: &User);
    fn user(&self) -> Option<User>;
    fn clear(&self);

    /// The cached profile, void when no token is present.
    fn profile(&self) -> Option<User> {
        self.token()?;
        self.user()
    }
}

// =============================================================================
// MEMORY
// =============================================================================

#[derive(Debug, Default)]
struct Slots {
    token: Option<String>,
    user: Option<User>,
}

/// Process-local store, used by tests and server rendering.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slots: Mutex<Slots>,
}

impl MemoryCredentialStore {
    fn with<R>(&self, f: impl FnOnce(&mut Slots) -> R) -> R {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut slots)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn set_token(&self, token: &str) {
        self.with(|s| s.token = Some(token.to_owned()));
    }

    fn token(&self) -> Option<String> {
        self.with(|s| s.token.clone())
    }

    fn set_user(&self, user: &User) {
        self.with(|s| s.user = Some(user.clone()));
    }

    fn user(&self) -> Option<User> {
        self.with(|s| s.user.clone())
    }

    fn clear(&self) {
        self.with(|s| *s = Slots::default());
    }
}

// =============================================================================
// COOKIE FORMAT
// =============================================================================

/// `Set-Cookie`/`document.cookie` assignment for the token.
#[must_use]
pub fn token_cookie(token: &str) -> String {
    format!("{TOKEN_KEY}={token}; path=/; max-age={COOKIE_MAX_AGE_SECS}; samesite=strict")
}

/// Assignment for the cached profile, JSON then percent-encoded.
///
/// # Errors
///
/// Returns an error if the profile cannot be serialized.
pub fn user_cookie(user: &User) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(user)?;
    Ok(format!(
        "{USER_KEY}={}; path=/; max-age={COOKIE_MAX_AGE_SECS}; samesite=lax",
        urlencoding::encode(&json)
    ))
}

/// Assignment that expires `name` immediately.
#[must_use]
pub fn expired_cookie(name: &str) -> String {
    format!("{name}=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT")
}

/// Find a non-empty cookie value in a `Cookie` header / `document.cookie` string.
#[must_use]
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Decode a stored profile. Malformed values read as absent.
#[must_use]
pub fn decode_user(raw: &str) -> Option<User> {
    let json = match urlencoding::decode(raw) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "stored user is not valid percent-encoding");
            return None;
        }
    };
    match serde_json::from_str(&json) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!(error = %e, "stored user is not a valid profile");
            None
        }
    }
}
