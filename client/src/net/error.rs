//! Normalized API failures.
//!
//! ERROR HANDLING
//! ==============
//! Every failed backend call collapses into one `ApiError` at the client
//! boundary. Views only read `user_message()` and `is_retryable()`; the one
//! variant with a side effect is `Unauthorized`, which the session store turns
//! into a forced logout.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::types::ErrorBody;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. The service is temporarily throttled; try again shortly.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to access this resource.";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
pub const SERVER_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";
pub const TIMEOUT_MESSAGE: &str = "The server took too long to respond.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Network failure before any HTTP status was received.
    #[error("{0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    /// The request was aborted by a newer request or an unmount.
    #[error("request cancelled")]
    Cancelled,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("rate limited")]
    RateLimited,
    #[error("server error: {0}")]
    Server(u16),
    /// Any other non-success status, carrying the backend's detail if it sent one.
    #[error("request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success HTTP status. `body` is the raw response text,
    /// consulted only for statuses without a fixed message.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            429 => Self::RateLimited,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            s if s >= 500 => Self::Server(s),
            s => Self::Rejected { status: s, detail: error_detail(body, s) },
        }
    }

    /// The single string a view shows for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(message) if message.trim().is_empty() => UNKNOWN_ERROR_MESSAGE.to_owned(),
            Self::Transport(message) | Self::Decode(message) => message.clone(),
            Self::Timeout => TIMEOUT_MESSAGE.to_owned(),
            Self::Cancelled => UNKNOWN_ERROR_MESSAGE.to_owned(),
            Self::Unauthorized => SESSION_EXPIRED_MESSAGE.to_owned(),
            Self::Forbidden => FORBIDDEN_MESSAGE.to_owned(),
            Self::NotFound => NOT_FOUND_MESSAGE.to_owned(),
            Self::RateLimited => RATE_LIMITED_MESSAGE.to_owned(),
            Self::Server(_) => SERVER_ERROR_MESSAGE.to_owned(),
            Self::Rejected { detail, .. } => detail.clone(),
        }
    }

    /// Whether offering a retry action makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout | Self::RateLimited | Self::Server(_) | Self::Decode(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

fn error_detail(body: &str, status: u16) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}
