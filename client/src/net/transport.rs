//! `gloo-net` transport.
//!
//! Client-side (hydrate): real `fetch` calls.
//! Server-side (SSR): every request fails with [`ApiError::Unavailable`];
//! data is only loaded after hydration.

use async_trait::async_trait;
use strapi::ApiError;
use strapi::transport::{HttpRequest, HttpResponse, Transport};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;
            use strapi::transport::Method;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let sent = match &request.body {
                Some(body) => builder
                    .json(body)
                    .map_err(|e| ApiError::Transport(e.to_string()))?
                    .send()
                    .await,
                None => builder.send().await,
            };
            let response = sent.map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }
}
