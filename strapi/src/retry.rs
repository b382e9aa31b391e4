//! Bounded retry for idempotent reads.
//!
//! Mutations never go through here. Reads give up immediately on 401/403 and
//! on anything [`ApiError::retryable`] rejects.

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

use std::future::Future;

use crate::error::ApiError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS }
    }
}

impl RetryPolicy {
    /// No retries at all.
    #[cfg(test)]
    pub(crate) fn none() -> Self {
        Self { max_attempts: 1 }
    }

    /// Whether another attempt may follow `attempts` failed ones ending in `err`.
    #[must_use]
    pub fn should_retry(&self, attempts: u32, err: &ApiError) -> bool {
        attempts < self.max_attempts && err.retryable()
    }

    /// Run `op` until it succeeds or the policy gives up.
    ///
    /// # Errors
    ///
    /// Returns the last error produced by `op`.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if self.should_retry(attempts, &err) => {
                    tracing::warn!(what, attempt = attempts, max = self.max_attempts, error = %err, "read failed; retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }
}
