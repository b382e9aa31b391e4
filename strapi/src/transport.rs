//! Transport seam between the services and an HTTP implementation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build implements [`Transport`] over `gloo-net`, the CLI uses
//! [`ReqwestTransport`], and tests script responses in-process. Futures are
//! not required to be `Send` so that browser fetch futures qualify.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// An outbound request. Bodies are always JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::Get, url: url.into(), headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Post, url: url.into(), headers: Vec::new(), body: Some(body) }
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_owned(), value.into()));
        self
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Sends one request and returns the raw status and body.
///
/// Implementations report only failures to obtain a response; non-2xx
/// statuses are returned as ordinary responses.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

// =============================================================================
// REQWEST
// =============================================================================

#[cfg(feature = "reqwest")]
pub use native::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod native {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{HttpRequest, HttpResponse, Method, Transport};
    use crate::config::Timeouts;
    use crate::error::ApiError;

    /// [`Transport`] over a pooled `reqwest` client.
    pub struct ReqwestTransport {
        http: reqwest::Client,
    }

    impl ReqwestTransport {
        /// # Errors
        ///
        /// Returns an error if the underlying HTTP client cannot be built.
        pub fn new(timeouts: Timeouts) -> Result<Self, ApiError> {
            let http = reqwest::Client::builder()
                .timeout(Duration::from_secs(timeouts.request_secs))
                .connect_timeout(Duration::from_secs(timeouts.connect_secs))
                .build()
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(Self { http })
        }
    }

    #[async_trait(?Send)]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let mut builder = match request.method {
                Method::Get => self.http.get(&request.url),
                Method::Post => self.http.post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            tracing::debug!(method = request.method.as_str(), url = %request.url, status, "http exchange");
            Ok(HttpResponse { status, body })
        }
    }
}
