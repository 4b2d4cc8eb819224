//! Error types for the Hogword API client.
//!
//! # Design
//! `SessionExpired` gets a dedicated variant because callers handle it
//! differently from every other failure: a view must drop its state and
//! return to the login screen instead of rendering an error. Every other
//! non-success response lands in `RequestFailed` with the server-supplied
//! message, so views can display it verbatim and offer a retry.

use thiserror::Error;

/// Errors returned by `HogwordClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 401 — the session is gone. The token store has
    /// already been cleared by the time the caller sees this.
    #[error("session expired")]
    SessionExpired,

    /// The server returned a non-2xx status other than 401. Carries the
    /// body's `detail` message, or the operation's fallback message when
    /// the body had no usable `detail` field.
    #[error("{0}")]
    RequestFailed(String),

    /// A success response body could not be deserialized into the
    /// expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// True for the distinguished session-expiry condition. Views use this
    /// to decide between "log out silently" and "show error and retry".
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}
