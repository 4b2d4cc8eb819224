//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results — including the token-store state before and
//! after the operation. Comparing parsed JSON (not raw strings) avoids false
//! negatives from field-ordering differences.

use std::sync::Arc;

use hogword_core::{
    ApiError, Credentials, HogwordClient, HttpMethod, HttpRequest, HttpResponse, MemoryTokenStore,
    SentenceAttempt, TokenStore, WordState,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

/// Build a client with a fresh in-memory store seeded from the case's
/// optional `store_token`.
fn case_client(case: &Value) -> (HogwordClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    if let Some(token) = case.get("store_token").and_then(Value::as_str) {
        store.set(token);
    }
    (HogwordClient::new(BASE_URL, store.clone()), store)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let pair = h.as_array().unwrap();
            (
                pair[0].as_str().unwrap().to_string(),
                pair[1].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(expected_body) => {
            let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&body, expected_body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Check the parse outcome and the token store's state against the case.
fn assert_outcome<T: serde::Serialize>(
    name: &str,
    result: Result<T, ApiError>,
    case: &Value,
    store: &MemoryTokenStore,
) {
    if let Some(expected_error) = case.get("expected_error") {
        let err = result.err().unwrap_or_else(|| panic!("{name}: expected an error"));
        if expected_error.as_str() == Some("SessionExpired") {
            assert!(matches!(err, ApiError::SessionExpired), "{name}: expected SessionExpired, got {err:?}");
        } else if let Some(message) = expected_error.get("request_failed").and_then(Value::as_str) {
            assert!(
                matches!(&err, ApiError::RequestFailed(msg) if msg == message),
                "{name}: expected RequestFailed({message:?}), got {err:?}"
            );
        } else {
            panic!("{name}: unknown expected_error: {expected_error}");
        }
    } else {
        let value = serde_json::to_value(result.unwrap_or_else(|e| panic!("{name}: {e}"))).unwrap();
        assert_eq!(value, case["expected_result"], "{name}: parsed result");
    }

    if let Some(token_after) = case.get("token_after") {
        assert_eq!(
            store.get().as_deref(),
            token_after.as_str(),
            "{name}: token store after parse"
        );
    }
}

// ---------------------------------------------------------------------------
// Authenticate
// ---------------------------------------------------------------------------

#[test]
fn authenticate_test_vectors() {
    let raw = include_str!("../../test-vectors/authenticate.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let (client, store) = case_client(case);
        let input: Credentials = serde_json::from_value(case["input"].clone()).unwrap();

        let req = client.build_authenticate(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = client.parse_authenticate(simulated_response(case));
        assert_outcome(name, result, case, &store);
    }
}

// ---------------------------------------------------------------------------
// Fetch word
// ---------------------------------------------------------------------------

#[test]
fn fetch_word_test_vectors() {
    let raw = include_str!("../../test-vectors/word.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let (client, store) = case_client(case);
        let state = match case["input"]["state"].as_str().unwrap() {
            "fetch" => WordState::Fetch,
            "gen" => WordState::Gen,
            other => panic!("{name}: unknown word state: {other}"),
        };

        let req = client.build_fetch_word(state);
        assert_request(name, &req, &case["expected_request"]);

        let result = client.parse_fetch_word(simulated_response(case));
        assert_outcome(name, result, case, &store);
    }
}

// ---------------------------------------------------------------------------
// Validate sentence
// ---------------------------------------------------------------------------

#[test]
fn validate_sentence_test_vectors() {
    let raw = include_str!("../../test-vectors/validate.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let (client, store) = case_client(case);
        let input: SentenceAttempt = serde_json::from_value(case["input"].clone()).unwrap();

        let req = client.build_validate_sentence(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = client.parse_validate_sentence(simulated_response(case));
        assert_outcome(name, result, case, &store);
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[test]
fn fetch_summary_test_vectors() {
    let raw = include_str!("../../test-vectors/summary.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let (client, store) = case_client(case);

        let req = client.build_fetch_summary();
        assert_request(name, &req, &case["expected_request"]);

        let result = client.parse_fetch_summary(simulated_response(case));
        assert_outcome(name, result, case, &store);
    }
}

// ---------------------------------------------------------------------------
// Today's log
// ---------------------------------------------------------------------------

#[test]
fn fetch_today_log_test_vectors() {
    let raw = include_str!("../../test-vectors/today_log.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let (client, store) = case_client(case);

        let req = client.build_fetch_today_log();
        assert_request(name, &req, &case["expected_request"]);

        let result = client.parse_fetch_today_log(simulated_response(case));
        assert_outcome(name, result, case, &store);
    }
}
