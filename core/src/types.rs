//! Wire DTOs for the Hogword API.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined
//! independently of the mock-server crate; integration tests catch schema
//! drift between the two. Beyond what the field types impose, no validation
//! is performed on success payloads — the backend owns the data, the client
//! is a typed pass-through.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sign-in/sign-up request payload. The backend treats the two as one
/// operation: an unknown email registers, a known one authenticates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful authentication result. `access_token` is the bearer token
/// persisted into the [`TokenStore`](crate::token::TokenStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_id: String,
}

/// Categorical difficulty of a word, as the backend spells it
/// (`advance`, not `advanced`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Intermediate,
    Advance,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advance => "advance",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which word the `GET /api/word` endpoint should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordState {
    /// The current pending word, unchanged.
    #[default]
    Fetch,
    /// A freshly generated word (after a skip or a completed attempt).
    Gen,
}

impl WordState {
    /// Value of the `state` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            WordState::Fetch => "fetch",
            WordState::Gen => "gen",
        }
    }
}

/// A vocabulary word handed out for practice. `play` is 1 when this word
/// already has a submitted attempt in the current cycle, 0 otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    pub difficulty: Difficulty,
    pub log_id: String,
    pub play: u8,
}

/// Request payload for grading one sentence against one word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceAttempt {
    pub word: String,
    pub user_sentence: String,
}

/// Grading result for a submitted sentence. `score` is in [0, 10].
/// `corrected_sentence` resolves to `None` whether the backend sends
/// `null` or omits the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub score: f64,
    pub suggestion: String,
    #[serde(default)]
    pub corrected_sentence: Option<String>,
}

/// One row of today's activity. `datetime` is an ISO timestamp kept as an
/// opaque string; the client does not interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub datetime: String,
    pub word: String,
    pub user_sentence: String,
    pub score: f64,
    pub suggestion: String,
}

/// Per-date word counts keyed by difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordsPerDay {
    pub date: String,
    pub words: BTreeMap<String, u32>,
}

/// Per-date average score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePerDay {
    pub date: String,
    pub score: f64,
}

/// Average score for one difficulty level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelScore {
    pub level: String,
    pub score: f64,
}

/// Number of attempts that landed on a given score, per difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCount {
    pub count: u32,
    pub score: f64,
    pub difficulty: String,
}

/// Aggregated practice statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub avg_score_today: f64,
    pub avg_score_all: f64,
    pub today_skip: u32,
    pub word_per_day: Vec<WordsPerDay>,
    pub score_per_day: Vec<ScorePerDay>,
    pub avg_score_level: Vec<LevelScore>,
    pub score_count_data: Vec<ScoreCount>,
}

/// Shape of backend error bodies. Only `detail` is ever read; everything
/// else in the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
