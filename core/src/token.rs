//! Session token storage.
//!
//! # Design
//! The bearer token is the only persistent client-side state. It lives
//! behind the `TokenStore` trait so hosts can inject whatever persistence
//! they have — a file on desktop, browser storage in WASM, an in-memory
//! fake in tests — instead of the client reaching for a hidden global.
//!
//! No validation of token shape or expiry happens here. Presence is the
//! sole authentication predicate; staleness is only ever discovered by the
//! server rejecting a request with 401, at which point the client clears
//! the store.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage for the one bearer token.
///
/// `set` and `clear` are infallible by contract: the store is best-effort
/// persistence, and a write failure must not turn into a request failure.
/// A store that cannot read simply reports the token as absent.
pub trait TokenStore: Send + Sync {
    /// The persisted token, or `None` if absent. Must not fail: a store
    /// whose backing medium is unavailable returns `None`.
    fn get(&self) -> Option<String>;

    /// Persist `token`, overwriting any prior value.
    fn set(&self, token: &str);

    /// Remove the persisted token.
    fn clear(&self);

    /// True iff a token is currently present.
    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

/// In-memory token store for tests and hosts with their own persistence.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().expect("token lock poisoned").clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().expect("token lock poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().expect("token lock poisoned") = None;
    }
}

/// File-backed token store: one token in one plain-text file.
///
/// The file plays the role of the original app's single browser-storage
/// key. Absence of the file is the logged-out state. Reads that fail for
/// any reason report the token as absent rather than erroring, and an
/// empty or whitespace-only file also counts as absent — a present token
/// is always a non-empty string.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn set(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(&self.path, token);
    }

    fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}
