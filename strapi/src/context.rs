//! Auth context: the session service the view tree reads from.
//!
//! One `AuthService` is built per page load (or CLI run) and passed down
//! explicitly. Views render from [`AuthSnapshot`] and call the actions, each
//! of which reports where to navigate next instead of navigating itself.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::auth::AuthApi;
use crate::client::StrapiClient;
use crate::clock::Clock;
use crate::error::ApiError;
use crate::navigation::Navigation;
use crate::papers::PapersStore;
use crate::session::{Revalidate, SessionCache, SessionState};
use crate::types::{AuthResponse, LoginRequest, RegisterRequest, ResetPasswordRequest, User};
use crate::validate::{self, RegisterForm, ResetPasswordForm};

/// What the UI renders from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub user: Option<User>,
    /// True until the first hydration settles and while a lookup without a
    /// usable cached user is in flight.
    pub loading: bool,
}

impl AuthSnapshot {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

pub struct AuthService {
    api: AuthApi,
    session: SessionCache,
    papers: Arc<PapersStore>,
    hydrated: AtomicBool,
}

impl AuthService {
    #[must_use]
    pub fn new(client: Arc<StrapiClient>, clock: Arc<dyn Clock>, papers: Arc<PapersStore>) -> Self {
        Self {
            api: AuthApi::new(client),
            session: SessionCache::new(clock),
            papers,
            hydrated: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn client(&self) -> &StrapiClient {
        self.api.client()
    }

    #[must_use]
    pub fn session(&self) -> &SessionCache {
        &self.session
    }

    #[must_use]
    pub fn papers(&self) -> &Arc<PapersStore> {
        &self.papers
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        let client = self.client();
        let state = self.session.state();
        let user = if client.has_token() {
            match &state {
                SessionState::Resolved(user) => Some(user.clone()),
                // Stored profile stands in until the lookup settles.
                SessionState::Idle | SessionState::Loading => client.store().profile(),
                SessionState::Invalid => None,
            }
        } else {
            None
        };
        AuthSnapshot {
            user,
            loading: !self.hydrated.load(Ordering::SeqCst) || state == SessionState::Loading,
        }
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// First read of the credential store for this page load.
    pub async fn hydrate(&self) -> AuthSnapshot {
        self.revalidate(Revalidate::Mount).await
    }

    /// Re-check the current user on mount or focus, reusing a fresh result.
    pub async fn revalidate(&self, trigger: Revalidate) -> AuthSnapshot {
        self.session.resolve(&self.api, trigger).await;
        self.hydrated.store(true, Ordering::SeqCst);
        self.snapshot()
    }

    /// Pending sign-in redirect left by a 401, if any. Fires once.
    pub fn take_redirect(&self) -> Option<Navigation> {
        let redirect = self.client().take_redirect();
        if redirect.is_some() {
            self.session.invalidate();
            self.papers.clear();
        }
        redirect
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// # Errors
    ///
    /// Returns a validation error before any request, or the server's
    /// rejection. Credentials are untouched on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Navigation, ApiError> {
        validate::login(email, password)?;
        let request = LoginRequest { identifier: email.trim().to_owned(), password: password.to_owned() };
        let auth = self
            .api
            .login(&request)
            .await
            .inspect_err(|err| tracing::warn!(code = err.error_code(), error = %err, "login failed"))?;
        self.establish(auth);
        Ok(Navigation::Dashboard)
    }

    /// # Errors
    ///
    /// Returns a validation error before any request, or the server's
    /// rejection (e.g. a taken username).
    pub async fn register(&self, form: &RegisterForm) -> Result<Navigation, ApiError> {
        validate::register(form)?;
        let request = RegisterRequest {
            username: form.username.trim().to_owned(),
            email: form.email.trim().to_owned(),
            password: form.password.clone(),
        };
        let auth = self
            .api
            .register(&request)
            .await
            .inspect_err(|err| tracing::warn!(code = err.error_code(), error = %err, "registration failed"))?;
        self.establish(auth);
        Ok(Navigation::Dashboard)
    }

    /// Drop the session locally. Nothing remote needs to happen, so this
    /// cannot fail.
    pub fn logout(&self) -> Navigation {
        self.client().sign_out();
        self.session.invalidate();
        self.papers.clear();
        self.hydrated.store(true, Ordering::SeqCst);
        tracing::info!("signed out");
        Navigation::Home
    }

    /// Ask the server to mail a reset link.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the server's
    /// rejection.
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        validate::forgot_password(email)?;
        self.api
            .forgot_password(email.trim())
            .await
            .inspect_err(|err| tracing::warn!(code = err.error_code(), error = %err, "reset link request failed"))
    }

    /// # Errors
    ///
    /// Returns a validation error before any request, or the server's
    /// rejection (e.g. an expired code).
    pub async fn reset_password(&self, form: &ResetPasswordForm) -> Result<Navigation, ApiError> {
        validate::reset_password(form)?;
        let request = ResetPasswordRequest {
            code: form.code.trim().to_owned(),
            password: form.password.clone(),
            password_confirmation: form.password_confirmation.clone(),
        };
        let auth = self
            .api
            .reset_password(&request)
            .await
            .inspect_err(|err| tracing::warn!(code = err.error_code(), error = %err, "password reset failed"))?;
        self.establish(auth);
        Ok(Navigation::Dashboard)
    }

    fn establish(&self, auth: AuthResponse) {
        self.client().sign_in(&auth);
        tracing::info!(user_id = auth.user.id, username = %auth.user.username, "signed in");
        self.session.prime(auth.user);
        self.hydrated.store(true, Ordering::SeqCst);
    }
}
