//! Auth API client for Strapi's users-permissions REST endpoints.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use crate::client::StrapiClient;
use crate::error::ApiError;
use crate::types::{AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, User};

const REGISTER_PATH: &str = "/auth/local/register";
const LOGIN_PATH: &str = "/auth/local";
const ME_PATH: &str = "/users/me";
const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

/// One method per endpoint; each issues exactly one request.
#[derive(Clone)]
pub struct AuthApi {
    client: Arc<StrapiClient>,
}

impl AuthApi {
    #[must_use]
    pub fn new(client: Arc<StrapiClient>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &StrapiClient {
        &self.client
    }

    /// `POST /auth/local/register`.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (e.g. "Email or Username are already taken").
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.client.post(REGISTER_PATH, request).await
    }

    /// `POST /auth/local`.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (e.g. "Invalid identifier or password").
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.client.post(LOGIN_PATH, request).await
    }

    /// `GET /users/me` with the stored bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the token is rejected.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.client.get(ME_PATH).await
    }

    /// `POST /auth/forgot-password`. The reply body carries nothing useful.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let request = ForgotPasswordRequest { email: email.to_owned() };
        let _: serde_json::Value = self.client.post(FORGOT_PASSWORD_PATH, &request).await?;
        Ok(())
    }

    /// `POST /auth/reset-password`.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (e.g. "Incorrect code provided").
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<AuthResponse, ApiError> {
        self.client.post(RESET_PASSWORD_PATH, request).await
    }
}
