//! Cookie-backed credential store.
//!
//! The token and profile live in `document.cookie` so the server-side route
//! guard sees the same session as the page. Outside the browser every read
//! is absent and every write is dropped.

use strapi::credentials::CredentialStore;
use strapi::types::User;

#[derive(Clone, Copy, Debug, Default)]
pub struct CookieCredentialStore;

#[cfg(feature = "hydrate")]
mod browser {
    use strapi::credentials::cookie_value;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    fn document() -> Option<HtmlDocument> {
        web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
    }

    pub(super) fn read(name: &str) -> Option<String> {
        let cookies = document()?.cookie().ok()?;
        cookie_value(&cookies, name).map(str::to_owned)
    }

    pub(super) fn write(cookie: &str) {
        let Some(document) = document() else {
            return;
        };
        if document.set_cookie(cookie).is_err() {
            tracing::warn!("browser refused cookie write");
        }
    }
}

#[cfg(feature = "hydrate")]
impl CredentialStore for CookieCredentialStore {
    fn set_token(&self, token: &str) {
        browser::write(&strapi::credentials::token_cookie(token));
    }

    fn token(&self) -> Option<String> {
        browser::read(strapi::credentials::TOKEN_KEY)
    }

    fn set_user(&self, user: &User) {
        match strapi::credentials::user_cookie(user) {
            Ok(cookie) => browser::write(&cookie),
            Err(e) => tracing::warn!(error = %e, "could not encode user profile"),
        }
    }

    fn user(&self) -> Option<User> {
        browser::read(strapi::credentials::USER_KEY).and_then(|raw| strapi::credentials::decode_user(&raw))
    }

    fn clear(&self) {
        browser::write(&strapi::credentials::expired_cookie(strapi::credentials::TOKEN_KEY));
        browser::write(&strapi::credentials::expired_cookie(strapi::credentials::USER_KEY));
    }
}

#[cfg(not(feature = "hydrate"))]
impl CredentialStore for CookieCredentialStore {
    fn set_token(&self, _token: &str) {}

    fn token(&self) -> Option<String> {
        None
    }

    fn set_user(&self, _user: &User) {}

    fn user(&self) -> Option<User> {
        None
    }

    fn clear(&self) {}
}
