//! Stateless HTTP request builder and response parser for the Hogword API.
//!
//! # Design
//! `HogwordClient` holds a `base_url` and a shared [`TokenStore`]; it carries
//! no other state between calls. Each API operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! All operations share one failure-handling path: 2xx decodes the body into
//! the operation's result type, 401 clears the token store and returns
//! [`ApiError::SessionExpired`], and anything else returns
//! [`ApiError::RequestFailed`] with the body's `detail` message or the
//! operation's fallback.

use std::env;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::token::TokenStore;
use crate::types::{
    AuthResponse, Credentials, ErrorBody, LogEntry, SentenceAttempt, Summary, ValidationResult,
    Word, WordState,
};

/// Production backend, used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.delete.codes";

/// Environment variable consulted by [`HogwordClient::from_env`].
pub const BASE_URL_ENV: &str = "HOGWORD_API_URL";

/// Synchronous, transport-agnostic client for the Hogword API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`. The token store is read at
/// build time and mutated only by `parse_authenticate` (on success), any
/// `parse_*` observing a 401, and [`logout`](Self::logout).
#[derive(Clone)]
pub struct HogwordClient {
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl fmt::Debug for HogwordClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HogwordClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.tokens.is_authenticated())
            .finish()
    }
}

impl HogwordClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Build a client against `HOGWORD_API_URL`, falling back to the
    /// production endpoint when the variable is unset.
    pub fn from_env(tokens: Arc<dyn TokenStore>) -> Self {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url, tokens)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True iff the store currently holds a token. Presence is the sole
    /// authentication predicate; expiry is only discovered via a 401.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    /// Local-only logout: clears the stored token. No request is built and
    /// no network traffic is implied.
    pub fn logout(&self) {
        self.tokens.clear();
    }

    // -----------------------------------------------------------------------
    // Authenticate
    // -----------------------------------------------------------------------

    /// `POST /auth/signin-up`. The only operation that does not carry a
    /// bearer token, and the only one that writes to the store on success.
    pub fn build_authenticate(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(credentials)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/auth/signin-up", self.base_url),
            headers: vec![content_type_json()],
            body: Some(body),
        })
    }

    pub fn parse_authenticate(&self, response: HttpResponse) -> Result<AuthResponse, ApiError> {
        self.check_status(&response, "Authentication failed")?;
        let auth: AuthResponse = decode(&response.body)?;
        self.tokens.set(&auth.access_token);
        Ok(auth)
    }

    // -----------------------------------------------------------------------
    // Fetch word
    // -----------------------------------------------------------------------

    /// `GET /api/word?state={fetch|gen}`. `Fetch` asks for the current
    /// pending word, `Gen` for a freshly generated one.
    pub fn build_fetch_word(&self, state: WordState) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/api/word?state={}", self.base_url, state.as_str()),
            headers: self.auth_headers(),
            body: None,
        }
    }

    pub fn parse_fetch_word(&self, response: HttpResponse) -> Result<Word, ApiError> {
        self.check_status(&response, "Failed to fetch word")?;
        decode(&response.body)
    }

    // -----------------------------------------------------------------------
    // Validate sentence
    // -----------------------------------------------------------------------

    /// `POST /api/validate-sentence`.
    pub fn build_validate_sentence(
        &self,
        attempt: &SentenceAttempt,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(attempt).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/api/validate-sentence", self.base_url),
            headers: self.auth_headers(),
            body: Some(body),
        })
    }

    pub fn parse_validate_sentence(
        &self,
        response: HttpResponse,
    ) -> Result<ValidationResult, ApiError> {
        self.check_status(&response, "Validation failed")?;
        decode(&response.body)
    }

    // -----------------------------------------------------------------------
    // Summary
    // -----------------------------------------------------------------------

    /// `GET /api/summary`.
    pub fn build_fetch_summary(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/api/summary", self.base_url),
            headers: self.auth_headers(),
            body: None,
        }
    }

    pub fn parse_fetch_summary(&self, response: HttpResponse) -> Result<Summary, ApiError> {
        self.check_status(&response, "Failed to fetch summary")?;
        decode(&response.body)
    }

    // -----------------------------------------------------------------------
    // Today's log
    // -----------------------------------------------------------------------

    /// `GET /api/today-log`. Entries come back most-recent-first; the
    /// client preserves the server's order.
    pub fn build_fetch_today_log(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/api/today-log", self.base_url),
            headers: self.auth_headers(),
            body: None,
        }
    }

    pub fn parse_fetch_today_log(&self, response: HttpResponse) -> Result<Vec<LogEntry>, ApiError> {
        self.check_status(&response, "Failed to fetch today log")?;
        decode(&response.body)
    }

    // -----------------------------------------------------------------------
    // Shared plumbing
    // -----------------------------------------------------------------------

    /// Header set for authenticated requests: JSON content type always,
    /// bearer authorization only when a token is present — never an empty
    /// `authorization` header. Reads the store at call time, no caching.
    fn auth_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![content_type_json()];
        if let Some(token) = self.tokens.get() {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    /// The shared failure path. 401 clears the token store and maps to
    /// `SessionExpired` regardless of body content; other non-2xx statuses
    /// map to `RequestFailed` with the body's `detail` message or
    /// `fallback` when the body is not JSON or has no `detail`.
    fn check_status(&self, response: &HttpResponse, fallback: &str) -> Result<(), ApiError> {
        if (200..300).contains(&response.status) {
            return Ok(());
        }
        if response.status == 401 {
            self.tokens.clear();
            return Err(ApiError::SessionExpired);
        }
        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| fallback.to_string());
        Err(ApiError::RequestFailed(message))
    }
}

fn content_type_json() -> (String, String) {
    ("content-type".to_string(), "application/json".to_string())
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
