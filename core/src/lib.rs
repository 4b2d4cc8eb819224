//! Synchronous API client core for the Hogword vocabulary-practice service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable
//! with nothing but in-memory data.
//!
//! # Design
//! - `HogwordClient` holds only `base_url` and an injected [`TokenStore`]
//!   — the bearer token is the sole piece of persistent client state.
//! - Each API operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - A 401 from any operation clears the token store and surfaces as the
//!   distinguished [`ApiError::SessionExpired`]; every other failure is
//!   [`ApiError::RequestFailed`] carrying the server's message, so callers
//!   can tell "log out silently" apart from "show error and retry".
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! [`TokenStore`]: token::TokenStore

pub mod client;
pub mod error;
pub mod http;
pub mod token;
pub mod types;

pub use client::{HogwordClient, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{
    AuthResponse, Credentials, Difficulty, LogEntry, SentenceAttempt, Summary, ValidationResult,
    Word, WordState,
};
