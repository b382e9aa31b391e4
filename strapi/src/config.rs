//! Content API endpoints parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:1337/api";
pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:1337/graphql";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// REST base, e.g. `https://cms.example.com/api`.
    pub api_url: String,
    /// GraphQL endpoint, e.g. `https://cms.example.com/graphql`.
    pub graphql_url: String,
    pub timeouts: Timeouts,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_GRAPHQL_URL)
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(api_url: impl Into<String>, graphql_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            graphql_url: graphql_url.into().trim_end_matches('/').to_owned(),
            timeouts: Timeouts::default(),
        }
    }

    /// Build config from environment variables.
    ///
    /// - `STRAPI_URL`: REST base (default `http://localhost:1337/api`)
    /// - `GRAPHQL_URL`: GraphQL endpoint (default: `STRAPI_URL` with a
    ///   trailing `/api` replaced by `/graphql`)
    /// - `STRAPI_REQUEST_TIMEOUT_SECS`: default 30
    /// - `STRAPI_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a URL is not http(s) or a timeout is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] over an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ApiConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("STRAPI_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let api_url = check_url("STRAPI_URL", api_url)?;
        let graphql_url = match lookup("GRAPHQL_URL") {
            Some(raw) => check_url("GRAPHQL_URL", raw)?,
            None => derive_graphql_url(&api_url),
        };
        let timeouts = Timeouts {
            request_secs: parse_secs(&lookup, "STRAPI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_secs(&lookup, "STRAPI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        Ok(Self { timeouts, ..Self::new(api_url, graphql_url) })
    }

    /// Absolute URL for a REST path such as `/auth/local`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

fn check_url(var: &'static str, raw: String) -> Result<String, ConfigError> {
    let value = raw.trim().trim_end_matches('/').to_owned();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value)
    } else {
        Err(ConfigError::InvalidUrl { var, value: raw })
    }
}

fn derive_graphql_url(api_url: &str) -> String {
    let origin = api_url.strip_suffix("/api").unwrap_or(api_url);
    format!("{origin}/graphql")
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidNumber { var, value: raw }),
        },
    }
}
