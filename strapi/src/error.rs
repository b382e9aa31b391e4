//! Error taxonomy for calls against the content API.
//!
//! DESIGN
//! ======
//! Three classes matter to callers: validation errors never leave the client,
//! authentication failures (401/403) invalidate or refuse the session and are
//! never retried, and everything else is a transport/server failure that reads
//! may retry and mutations surface as-is.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Errors produced by the auth and papers services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Input was rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The server answered 401; local credentials have been cleared.
    #[error("your session has expired, please sign in again")]
    Unauthorized,

    /// The server refused the operation for the current identity.
    #[error("{message}")]
    Forbidden { message: String },

    /// The server returned a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The GraphQL endpoint reported errors and returned no usable data.
    #[error("{}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The requested record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The operation needs a browser context (e.g. during server rendering).
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// HTTP status associated with the error, when there is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 style failures.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden { .. })
    }

    /// Whether an idempotent read may be attempted again after this error.
    #[must_use]
    pub fn retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => !matches!(status, 401 | 403 | 404),
            Self::Transport(_) | Self::Decode(_) | Self::GraphQl(_) => true,
            _ => false,
        }
    }

    /// Stable code for structured logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Unauthorized => "E_UNAUTHORIZED",
            Self::Forbidden { .. } => "E_FORBIDDEN",
            Self::Status { .. } => "E_STATUS",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Decode(_) => "E_DECODE",
            Self::GraphQl(_) => "E_GRAPHQL",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::Unavailable => "E_UNAVAILABLE",
        }
    }

    /// Build the error for a non-success response, preferring the message in
    /// Strapi's `{"error":{"message":..}}` body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = error_message(body).unwrap_or_else(|| format!("request failed with status {status}"));
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden { message },
            _ => Self::Status { status, message },
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract the human-readable message from a Strapi error body.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    let message = envelope.error.message.trim();
    (!message.is_empty()).then(|| message.to_owned())
}
