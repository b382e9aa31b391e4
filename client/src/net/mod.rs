//! Browser implementations of the `strapi` I/O seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` carries requests over `gloo-net`, `cookies` persists the
//! session in `document.cookie`. Both are inert during server rendering so
//! SSR never reads or writes credentials.

pub mod cookies;
pub mod transport;

use std::sync::Arc;

use strapi::config::ApiConfig;
use strapi::{Services, clock::Clock};

use crate::util::clock::BrowserClock;

/// Endpoints baked in at build time, falling back to a local Strapi.
pub fn api_config() -> ApiConfig {
    let lookup = |key: &str| {
        match key {
            "STRAPI_URL" => option_env!("STRAPI_URL"),
            "GRAPHQL_URL" => option_env!("GRAPHQL_URL"),
            _ => None,
        }
        .map(str::to_owned)
    };
    ApiConfig::from_lookup(lookup).unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid build-time endpoint; using defaults");
        ApiConfig::default()
    })
}

/// Wire the service graph for this page load.
pub fn browser_services() -> Services {
    let clock: Arc<dyn Clock> = Arc::new(BrowserClock);
    Services::new(
        api_config(),
        Arc::new(transport::BrowserTransport),
        Arc::new(cookies::CookieCredentialStore),
        clock,
    )
}
