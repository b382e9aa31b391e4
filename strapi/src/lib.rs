//! Client-side session and data layer for the Strapi-backed papers app.
//!
//! This crate owns everything the UI needs that is not rendering: the
//! credential store contract, the authenticated request pipeline (REST for
//! auth, GraphQL for papers), the current-user session cache, the papers
//! query cache, the route guard, and form validation. It is shared by the
//! Leptos `client`, the Axum `server` host and the `cli`.
//!
//! I/O is reached only through the [`transport::Transport`] and
//! [`credentials::CredentialStore`] seams, so the same services run in the
//! browser (`gloo-net` + cookies), natively (`reqwest` + a file) and in tests
//! (in-process fakes).

pub mod auth;
pub mod client;
pub mod clock;
pub mod config;
pub mod context;
pub mod credentials;
pub mod error;
pub mod graphql;
pub mod guard;
pub mod navigation;
pub mod papers;
pub mod retry;
pub mod session;
#[cfg(test)]
mod testing;
pub mod transport;
pub mod types;
pub mod validate;

use std::sync::Arc;

pub use client::StrapiClient;
pub use config::ApiConfig;
pub use context::{AuthService, AuthSnapshot};
pub use error::ApiError;
pub use navigation::Navigation;
pub use papers::PapersStore;

/// The wired service graph handed to a UI or CLI.
///
/// Both services share one [`StrapiClient`], so a 401 observed by either one
/// clears the same credential store.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<AuthService>,
    pub papers: Arc<PapersStore>,
}

impl Services {
    #[must_use]
    pub fn new(
        config: ApiConfig,
        transport: Arc<dyn transport::Transport>,
        store: Arc<dyn credentials::CredentialStore>,
        clock: Arc<dyn clock::Clock>,
    ) -> Self {
        let client = Arc::new(StrapiClient::new(config, transport, store));
        let papers = Arc::new(PapersStore::new(client.clone(), clock.clone()));
        let auth = Arc::new(AuthService::new(client, clock, papers.clone()));
        Self { auth, papers }
    }
}
