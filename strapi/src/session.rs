//! Current-user session cache.
//!
//! STATE MACHINE
//! =============
//! `Idle` (never resolved) -> `Loading` -> `Resolved(user)` | `Invalid`.
//!
//! - No token: `Invalid` immediately, no request.
//! - Token: `GET /users/me`; success resolves, any failure clears the token and
//!   invalidates. Failures are authoritative and never retried.
//! - Re-entry on mount or window focus reuses a `Resolved` value younger than
//!   the staleness window instead of asking again.
//!
//! - Overlapping resolves share one request: while a lookup is in flight,
//!   later callers wait for its outcome instead of sending their own.
//!
//! Each transition bumps a generation counter; a response that lands after a
//! newer `prime`/`invalidate` is dropped rather than overwriting it. Callers
//! waiting on that lookup receive the newer state instead.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::channel::oneshot;

use crate::auth::AuthApi;
use crate::clock::Clock;
use crate::types::User;

pub const SESSION_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Resolved(User),
    Invalid,
}

impl SessionState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Resolved(user) => Some(user),
            _ => None,
        }
    }
}

/// What caused a revalidation; recorded in logs only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Revalidate {
    Mount,
    Focus,
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    fetched_at: Option<Duration>,
    generation: u64,
    /// Generation the in-flight lookup started under, if any.
    in_flight: Option<u64>,
    waiters: Vec<oneshot::Sender<SessionState>>,
}

impl Inner {
    /// Record a transition and hand the new state to everyone waiting.
    fn settle(&mut self, state: SessionState, fetched_at: Option<Duration>) {
        self.generation += 1;
        self.state = state;
        self.fetched_at = fetched_at;
        self.in_flight = None;
        for waiter in self.waiters.drain(..) {
            let _ = waiter.send(self.state.clone());
        }
    }
}

/// Releases the in-flight slot if the lookup future is dropped before it
/// settles. Waiters then see their channel close and fall back to the
/// current state.
struct Flight<'a> {
    cache: &'a SessionCache,
    generation: u64,
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        let mut inner = self.cache.lock();
        if inner.in_flight == Some(self.generation) {
            inner.in_flight = None;
            inner.waiters.clear();
        }
    }
}

pub struct SessionCache {
    clock: Arc<dyn Clock>,
    stale_after: Duration,
    inner: Mutex<Inner>,
}

impl SessionCache {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_stale_after(clock, SESSION_STALE_AFTER)
    }

    #[must_use]
    pub fn with_stale_after(clock: Arc<dyn Clock>, stale_after: Duration) -> Self {
        Self {
            clock,
            stale_after,
            inner: Mutex::new(Inner {
                state: SessionState::Idle,
                fetched_at: None,
                generation: 0,
                in_flight: None,
                waiters: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    /// Whether a resolved user is still inside the staleness window.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        let inner = self.lock();
        matches!(inner.state, SessionState::Resolved(_))
            && inner
                .fetched_at
                .is_some_and(|at| self.clock.now().saturating_sub(at) < self.stale_after)
    }

    /// Seed the cache with a user obtained from login/register/reset.
    pub fn prime(&self, user: User) {
        let now = self.clock.now();
        self.lock().settle(SessionState::Resolved(user), Some(now));
    }

    pub fn invalidate(&self) {
        self.lock().settle(SessionState::Invalid, None);
    }

    /// Run the transition for the current token.
    pub async fn resolve(&self, auth: &AuthApi, trigger: Revalidate) -> SessionState {
        if !auth.client().has_token() {
            let mut inner = self.lock();
            if inner.state != SessionState::Invalid || inner.in_flight.is_some() {
                inner.settle(SessionState::Invalid, None);
            }
            return SessionState::Invalid;
        }
        if self.is_fresh() {
            return self.state();
        }

        let generation = {
            let mut inner = self.lock();
            if inner.in_flight.is_some() {
                let (tx, rx) = oneshot::channel();
                inner.waiters.push(tx);
                drop(inner);
                tracing::debug!(?trigger, "joining in-flight current-user lookup");
                return match rx.await {
                    Ok(state) => state,
                    Err(oneshot::Canceled) => self.state(),
                };
            }
            // A stale resolved user stays visible while it is re-checked.
            if !matches!(inner.state, SessionState::Resolved(_)) {
                inner.state = SessionState::Loading;
            }
            inner.in_flight = Some(inner.generation);
            inner.generation
        };
        let _flight = Flight { cache: self, generation };
        tracing::debug!(?trigger, "revalidating current user");

        let result = auth.me().await;
        let now = self.clock.now();
        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::debug!("discarding superseded current-user response");
            return inner.state.clone();
        }
        match result {
            Ok(user) => {
                auth.client().store().set_user(&user);
                inner.settle(SessionState::Resolved(user), Some(now));
            }
            Err(err) => {
                tracing::warn!(code = err.error_code(), error = %err, "current user lookup failed; clearing session");
                auth.client().sign_out();
                inner.settle(SessionState::Invalid, None);
            }
        }
        inner.state.clone()
    }
}
