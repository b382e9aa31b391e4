//! Authenticated request pipeline shared by the auth and papers services.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every outbound call passes through [`StrapiClient::execute`], which attaches
//! the bearer token and inspects the response. A 401 clears the credential
//! store and arms a single sign-in redirect; clearing never issues a request,
//! so an expired session cannot loop.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::credentials::CredentialStore;
use crate::error::ApiError;
use crate::navigation::Navigation;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::types::AuthResponse;

pub struct StrapiClient {
    config: ApiConfig,
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
    /// Set by the first 401 after a sign-in; reset by the next sign-in.
    expired: AtomicBool,
    redirect_pending: AtomicBool,
}

impl StrapiClient {
    #[must_use]
    pub fn new(config: ApiConfig, transport: Arc<dyn Transport>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            config,
            transport,
            store,
            expired: AtomicBool::new(false),
            redirect_pending: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.store.token().is_some()
    }

    /// Persist a fresh session and re-arm the expiry latch.
    pub fn sign_in(&self, auth: &AuthResponse) {
        self.store.set_token(&auth.jwt);
        self.store.set_user(&auth.user);
        self.expired.store(false, Ordering::SeqCst);
        self.redirect_pending.store(false, Ordering::SeqCst);
    }

    /// Drop local credentials. Purely local; no request is made.
    pub fn sign_out(&self) {
        self.store.clear();
    }

    /// Consume the pending redirect produced by a 401, if any.
    pub fn take_redirect(&self) -> Option<Navigation> {
        self.redirect_pending
            .swap(false, Ordering::SeqCst)
            .then_some(Navigation::SignIn)
    }

    /// `GET` a REST path and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the transport error, a status error, or a decode error.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(HttpRequest::get(self.config.endpoint(path))).await?;
        response.json()
    }

    /// `POST` a JSON body to a REST path and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// Returns the transport error, a status error, or a decode error.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self.execute(HttpRequest::post(self.config.endpoint(path), body)).await?;
        response.json()
    }

    /// Send a request with the bearer token attached and map non-2xx replies
    /// to errors.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] on 401 (after clearing credentials),
    /// otherwise the transport or status error.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = self.authorize(request);
        let url = request.url.clone();
        let response = self.transport.send(request).await.map_err(|err| {
            tracing::warn!(%url, code = err.error_code(), error = %err, "request failed");
            err
        })?;
        if response.is_success() {
            return Ok(response);
        }

        let err = ApiError::from_status(response.status, &response.body);
        if response.status == 401 {
            self.expire_session();
        } else {
            tracing::warn!(%url, status = response.status, error = %err, "request rejected");
        }
        Err(err)
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        match self.store.token() {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    fn expire_session(&self) {
        self.store.clear();
        if !self.expired.swap(true, Ordering::SeqCst) {
            tracing::info!("session rejected with 401; credentials cleared");
            self.redirect_pending.store(true, Ordering::SeqCst);
        }
    }
}
