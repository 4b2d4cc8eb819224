//! In-memory stand-in for the Hogword backend.
//!
//! Implements the five endpoints the client core talks to — signin-up,
//! word, validate-sentence, today-log, summary — with deterministic
//! grading and a fixed word rotation, so integration tests can exercise
//! the full wire contract without the real service. Not a reimplementation
//! of the backend's word generation or sentence scoring.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

/// Fixed rotation of practice words with their difficulty levels.
const WORDS: &[(&str, &str)] = &[
    ("ephemeral", "easy"),
    ("ubiquitous", "intermediate"),
    ("perfunctory", "advance"),
    ("candid", "easy"),
    ("meticulous", "intermediate"),
    ("obfuscate", "advance"),
];

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordResponse {
    pub word: String,
    pub difficulty: String,
    pub log_id: String,
    pub play: u8,
}

#[derive(Debug, Deserialize)]
pub struct SentenceAttempt {
    pub word: String,
    pub user_sentence: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub score: f64,
    pub suggestion: String,
    pub corrected_sentence: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub datetime: String,
    pub word: String,
    pub user_sentence: String,
    pub score: f64,
    pub suggestion: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Summary {
    pub avg_score_today: f64,
    pub avg_score_all: f64,
    pub today_skip: u32,
    pub word_per_day: Vec<WordsPerDay>,
    pub score_per_day: Vec<ScorePerDay>,
    pub avg_score_level: Vec<LevelScore>,
    pub score_count_data: Vec<ScoreCount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordsPerDay {
    pub date: String,
    pub words: BTreeMap<String, u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScorePerDay {
    pub date: String,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LevelScore {
    pub level: String,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreCount {
    pub count: u32,
    pub score: f64,
    pub difficulty: String,
}

#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

type ApiErr = (StatusCode, Json<ErrorDetail>);

fn err(status: StatusCode, detail: impl Into<String>) -> ApiErr {
    (
        status,
        Json(ErrorDetail {
            detail: detail.into(),
        }),
    )
}

#[derive(Debug, Clone)]
struct Attempt {
    datetime: DateTime<Utc>,
    word: String,
    difficulty: String,
    user_sentence: String,
    score: f64,
    suggestion: String,
}

#[derive(Debug, Default)]
pub struct AppState {
    /// token -> user_id
    sessions: HashMap<String, String>,
    /// email -> user_id, stable across repeat sign-ins
    users: HashMap<String, String>,
    /// cursor into WORDS
    next_word: usize,
    pending: Option<WordResponse>,
    /// newest first
    attempts: Vec<Attempt>,
    today_skip: u32,
}

pub type Db = Arc<RwLock<AppState>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(AppState::default()));
    Router::new()
        .route("/auth/signin-up", post(signin_up))
        .route("/api/word", get(get_word))
        .route("/api/validate-sentence", post(validate_sentence))
        .route("/api/today-log", get(today_log))
        .route("/api/summary", get(summary))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn signin_up(
    State(db): State<Db>,
    Json(creds): Json<Credentials>,
) -> Result<Json<AuthResponse>, ApiErr> {
    if creds.password.len() < 4 {
        return Err(err(StatusCode::BAD_REQUEST, "Invalid credentials"));
    }
    let mut state = db.write().await;
    let user_id = state
        .users
        .entry(creds.email.clone())
        .or_insert_with(|| Uuid::new_v4().to_string())
        .clone();
    let token = Uuid::new_v4().to_string();
    state.sessions.insert(token.clone(), user_id.clone());
    info!(email = %creds.email, %user_id, "issued session token");
    Ok(Json(AuthResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        user_id,
    }))
}

/// Check the bearer token in `headers` against issued sessions.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiErr> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match token {
        Some(token) if state.sessions.contains_key(token) => Ok(()),
        _ => Err(err(StatusCode::UNAUTHORIZED, "Not authenticated")),
    }
}

#[derive(Deserialize)]
struct WordQuery {
    state: Option<String>,
}

async fn get_word(
    State(db): State<Db>,
    Query(query): Query<WordQuery>,
    headers: HeaderMap,
) -> Result<Json<WordResponse>, ApiErr> {
    let mut state = db.write().await;
    authorize(&state, &headers)?;

    match query.state.as_deref().unwrap_or("fetch") {
        "fetch" => {
            if state.pending.is_none() {
                assign_next_word(&mut state);
            }
        }
        "gen" => {
            // Abandoning an unplayed word counts as a skip.
            if matches!(&state.pending, Some(p) if p.play == 0) {
                state.today_skip += 1;
            }
            assign_next_word(&mut state);
        }
        other => {
            return Err(err(
                StatusCode::BAD_REQUEST,
                format!("Unknown word state: {other}"),
            ));
        }
    }

    let word = state.pending.clone().expect("pending word just assigned");
    Ok(Json(word))
}

fn assign_next_word(state: &mut AppState) {
    let (word, difficulty) = WORDS[state.next_word % WORDS.len()];
    state.next_word += 1;
    state.pending = Some(WordResponse {
        word: word.to_string(),
        difficulty: difficulty.to_string(),
        log_id: Uuid::new_v4().to_string(),
        play: 0,
    });
}

/// Deterministic test-double grading: 8.0 when the sentence uses the word,
/// 2.0 with a corrected sentence otherwise.
fn grade(word: &str, sentence: &str) -> (f64, String, Option<String>) {
    if sentence.to_lowercase().contains(&word.to_lowercase()) {
        (8.0, "Good usage of the word.".to_string(), None)
    } else {
        (
            2.0,
            format!("The sentence does not use \"{word}\"."),
            Some(format!("Today I learned the word {word}.")),
        )
    }
}

async fn validate_sentence(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(attempt): Json<SentenceAttempt>,
) -> Result<Json<ValidationResponse>, ApiErr> {
    let mut state = db.write().await;
    authorize(&state, &headers)?;

    if attempt.user_sentence.trim().is_empty() {
        return Err(err(StatusCode::BAD_REQUEST, "Sentence must not be empty"));
    }

    let (score, suggestion, corrected_sentence) = grade(&attempt.word, &attempt.user_sentence);

    let difficulty = match &mut state.pending {
        Some(pending) if pending.word == attempt.word => {
            pending.play = 1;
            pending.difficulty.clone()
        }
        _ => WORDS
            .iter()
            .find(|(w, _)| *w == attempt.word)
            .map(|(_, d)| d.to_string())
            .unwrap_or_else(|| "easy".to_string()),
    };

    info!(word = %attempt.word, score, "graded sentence");
    state.attempts.insert(
        0,
        Attempt {
            datetime: Utc::now(),
            word: attempt.word,
            difficulty,
            user_sentence: attempt.user_sentence,
            score,
            suggestion: suggestion.clone(),
        },
    );

    Ok(Json(ValidationResponse {
        score,
        suggestion,
        corrected_sentence,
    }))
}

async fn today_log(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<LogEntry>>, ApiErr> {
    let state = db.read().await;
    authorize(&state, &headers)?;

    let today = Utc::now().format("%Y-%m-%d").to_string();
    let entries = state
        .attempts
        .iter()
        .filter(|a| a.datetime.format("%Y-%m-%d").to_string() == today)
        .map(|a| LogEntry {
            datetime: a.datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            word: a.word.clone(),
            user_sentence: a.user_sentence.clone(),
            score: a.score,
            suggestion: a.suggestion.clone(),
        })
        .collect();
    Ok(Json(entries))
}

async fn summary(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Summary>, ApiErr> {
    let state = db.read().await;
    authorize(&state, &headers)?;

    let today = Utc::now().format("%Y-%m-%d").to_string();

    let avg = |scores: &[f64]| {
        if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        }
    };

    let all_scores: Vec<f64> = state.attempts.iter().map(|a| a.score).collect();
    let today_scores: Vec<f64> = state
        .attempts
        .iter()
        .filter(|a| a.datetime.format("%Y-%m-%d").to_string() == today)
        .map(|a| a.score)
        .collect();

    let mut words_by_day: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
    let mut scores_by_day: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut scores_by_level: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut counts: Vec<ScoreCount> = Vec::new();

    for attempt in &state.attempts {
        let date = attempt.datetime.format("%Y-%m-%d").to_string();
        *words_by_day
            .entry(date.clone())
            .or_default()
            .entry(attempt.difficulty.clone())
            .or_default() += 1;
        scores_by_day.entry(date).or_default().push(attempt.score);
        scores_by_level
            .entry(attempt.difficulty.clone())
            .or_default()
            .push(attempt.score);

        match counts
            .iter_mut()
            .find(|c| c.score == attempt.score && c.difficulty == attempt.difficulty)
        {
            Some(entry) => entry.count += 1,
            None => counts.push(ScoreCount {
                count: 1,
                score: attempt.score,
                difficulty: attempt.difficulty.clone(),
            }),
        }
    }

    Ok(Json(Summary {
        avg_score_today: avg(&today_scores),
        avg_score_all: avg(&all_scores),
        today_skip: state.today_skip,
        word_per_day: words_by_day
            .into_iter()
            .map(|(date, words)| WordsPerDay { date, words })
            .collect(),
        score_per_day: scores_by_day
            .into_iter()
            .map(|(date, scores)| ScorePerDay {
                date,
                score: avg(&scores),
            })
            .collect(),
        avg_score_level: scores_by_level
            .into_iter()
            .map(|(level, scores)| LevelScore {
                level,
                score: avg(&scores),
            })
            .collect(),
        score_count_data: counts,
    }))
}
