//! End-to-end tests for the request executor against a local mock server.
//!
//! Covers the terminal classifications, backoff timing, deadline handling
//! and connection sharing of the retry loop.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use demoblaze_core::http::{Disposition, RequestExecutor, RequestSpec, Session, SessionConfig};
use demoblaze_core::retry::RetryPolicy;

/// Policy with delays short enough to keep the suite fast.
fn quick_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay_ms: 20,
        max_delay_ms: 100,
        multiplier: 2.0,
        jitter_factor: 0.0,
        ..RetryPolicy::default()
    }
}

fn executor_for(uri: &str, policy: RetryPolicy) -> RequestExecutor {
    let session = Session::new(SessionConfig::new(uri)).unwrap();
    RequestExecutor::new(session, policy).unwrap()
}

#[tokio::test]
async fn test_success_on_first_attempt_is_single_shot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Total": 9})))
        .expect(2)
        .mount(&server)
        .await;

    let executor = executor_for(&server.uri(), quick_policy(3));
    let spec = RequestSpec::get("/entries");
    let outcome = executor.execute(&spec).await.unwrap();

    assert_eq!(outcome.disposition, Disposition::Success);
    assert_eq!(outcome.status, Some(200));
    assert_eq!(outcome.attempts, 1);
    assert!(outcome.error.is_none());
    assert_eq!(outcome.history.len(), 1);
    assert!(outcome.history[0].delay_before_next.is_none());

    // The same spec against the same backend classifies identically.
    let repeat = executor.execute(&spec).await.unwrap();
    assert_eq!(repeat.disposition, outcome.disposition);
    assert_eq!(repeat.status, outcome.status);
    assert_eq!(repeat.attempts, outcome.attempts);
    assert_eq!(repeat.body, outcome.body);
}

#[tokio::test]
async fn test_transient_server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    // First two calls fail with 503, the third succeeds.
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(&server.uri(), quick_policy(3));
    let outcome = executor
        .execute(&RequestSpec::get("/entries"))
        .await
        .unwrap();

    assert_eq!(outcome.disposition, Disposition::Success);
    assert_eq!(outcome.attempts, 3);
    assert_eq!(outcome.text(), "recovered");

    // Backoff slept 20ms then 40ms; total elapsed must cover both.
    assert!(outcome.elapsed >= Duration::from_millis(60));
    assert_eq!(outcome.history.len(), 3);
    assert_eq!(outcome.history[0].status, Some(503));
    assert_eq!(
        outcome.history[0].delay_before_next,
        Some(Duration::from_millis(20))
    );
    assert_eq!(
        outcome.history[1].delay_before_next,
        Some(Duration::from_millis(40))
    );
    assert!(outcome.history[2].delay_before_next.is_none());
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/view"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such product"))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(&server.uri(), quick_policy(3));
    let outcome = executor.execute(&RequestSpec::get("/view")).await.unwrap();

    assert_eq!(outcome.disposition, Disposition::ClientError);
    assert_eq!(outcome.attempts, 1);

    let err = outcome.into_success().unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("no such product"));
}

#[tokio::test]
async fn test_server_error_exhausts_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&server)
        .await;

    let executor = executor_for(&server.uri(), quick_policy(3));
    let outcome = executor
        .execute(&RequestSpec::get("/entries"))
        .await
        .unwrap();

    assert_eq!(outcome.disposition, Disposition::ServerError);
    assert_eq!(outcome.attempts, 3);
    assert_eq!(outcome.status, Some(500));
    let err = outcome.error.unwrap();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_rate_limit_exhaustion_is_policy_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&server)
        .await;

    let executor = executor_for(&server.uri(), quick_policy(2));
    let outcome = executor
        .execute(&RequestSpec::get("/entries"))
        .await
        .unwrap();

    assert_eq!(outcome.disposition, Disposition::PolicyExhausted);
    assert_eq!(outcome.attempts, 2);
    let err = outcome.error.unwrap();
    assert!(err.to_string().contains("2 attempts"));
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn test_retry_after_header_replaces_computed_backoff() {
    let server = MockServer::start().await;
    // The server asks for an immediate retry; the configured backoff of 2s
    // must not be slept.
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(503).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let slow_policy = RetryPolicy {
        max_attempts: 2,
        base_delay_ms: 2_000,
        max_delay_ms: 2_000,
        multiplier: 1.0,
        jitter_factor: 0.0,
        ..RetryPolicy::default()
    };
    let executor = executor_for(&server.uri(), slow_policy);
    let outcome = executor
        .execute(&RequestSpec::get("/entries"))
        .await
        .unwrap();

    assert_eq!(outcome.disposition, Disposition::Success);
    assert_eq!(outcome.attempts, 2);
    assert!(outcome.elapsed < Duration::from_secs(1));
}

#[tokio::test]
async fn test_accepted_status_counts_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/view"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(&server.uri(), quick_policy(3));
    let spec = RequestSpec::get("/view").accept_status(404);
    let outcome = executor.execute(&spec).await.unwrap();

    assert_eq!(outcome.disposition, Disposition::Success);
    assert_eq!(outcome.status, Some(404));
    assert!(outcome.error.is_none());
    assert_eq!(outcome.attempts, 1);
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    // Port 1 is never listening on loopback.
    let executor = executor_for("http://127.0.0.1:1", quick_policy(2));
    let outcome = executor
        .execute(&RequestSpec::get("/entries"))
        .await
        .unwrap();

    assert_eq!(outcome.disposition, Disposition::TransportFailure);
    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.status, None);
    assert_eq!(outcome.history.len(), 2);
    assert!(outcome.history[0].error.is_some());

    let err = outcome.error.unwrap();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_per_call_timeout_is_honored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let executor = executor_for(&server.uri(), RetryPolicy::none());
    let spec = RequestSpec::get("/slow").with_timeout(Duration::from_millis(100));
    let outcome = executor.execute(&spec).await.unwrap();

    assert_eq!(outcome.disposition, Disposition::TransportFailure);
    assert_eq!(outcome.attempts, 1);
    let err = outcome.error.unwrap();
    assert!(err.root_cause().to_string().contains("timed out"));
}

#[tokio::test]
async fn test_deadline_stops_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let stubborn_policy = RetryPolicy {
        max_attempts: 5,
        base_delay_ms: 5_000,
        max_delay_ms: 5_000,
        multiplier: 1.0,
        jitter_factor: 0.0,
        ..RetryPolicy::default()
    };
    let executor =
        executor_for(&server.uri(), stubborn_policy).with_deadline(Duration::from_millis(300));
    let outcome = executor
        .execute(&RequestSpec::get("/entries"))
        .await
        .unwrap();

    // The 5s backoff does not fit in the 300ms deadline, so the loop gives
    // up after the first attempt without sleeping.
    assert_eq!(outcome.disposition, Disposition::TransportFailure);
    assert_eq!(outcome.attempts, 1);
    assert_eq!(outcome.status, Some(503));
    assert!(outcome.elapsed < Duration::from_secs(1));

    let err = outcome.error.unwrap();
    assert!(err.to_string().contains("deadline"));
}

#[tokio::test]
async fn test_oversized_response_is_aborted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'x'; 4096]))
        .mount(&server)
        .await;

    let config = SessionConfig {
        max_response_size: 1024,
        ..SessionConfig::new(server.uri())
    };
    let session = Session::new(config).unwrap();
    let executor = RequestExecutor::new(session, RetryPolicy::none()).unwrap();
    let outcome = executor
        .execute(&RequestSpec::get("/entries"))
        .await
        .unwrap();

    assert_eq!(outcome.disposition, Disposition::TransportFailure);
    let err = outcome.error.unwrap();
    assert!(err.report().contains("exceeds"));
}

#[tokio::test]
async fn test_malformed_json_surfaces_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let executor = executor_for(&server.uri(), quick_policy(3));
    let outcome = executor
        .execute(&RequestSpec::get("/entries"))
        .await
        .unwrap();

    assert_eq!(outcome.disposition, Disposition::Success);
    let err = outcome.json::<serde_json::Value>().unwrap_err();
    assert!(err.as_decode().is_some());
}

#[tokio::test]
async fn test_query_and_headers_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/view"))
        .and(query_param("id", "1"))
        .and(header("Content-Type", "application/json"))
        .and(header("X-Request-Id", "abc-123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(&server.uri(), quick_policy(3));
    let spec = RequestSpec::get("/view")
        .with_query("id", "1")
        .with_header("X-Request-Id", "abc-123");
    let outcome = executor.execute(&spec).await.unwrap();

    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_json_body_reaches_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"username": "kermit", "password": "pond"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("Auth_token: abc"))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(&server.uri(), quick_policy(3));
    let spec =
        RequestSpec::post("/login").with_json(json!({"username": "kermit", "password": "pond"}));
    let outcome = executor.execute(&spec).await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.text(), "Auth_token: abc");
}

#[tokio::test]
async fn test_concurrent_executors_share_one_session() {
    let server = MockServer::start().await;
    for name in ["alpha", "beta", "gamma", "delta"] {
        Mock::given(method("GET"))
            .and(path(format!("/items/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(name))
            .expect(1)
            .mount(&server)
            .await;
    }

    let executor = executor_for(&server.uri(), quick_policy(3));

    let mut handles = Vec::new();
    for name in ["alpha", "beta", "gamma", "delta"] {
        let executor = executor.clone();
        handles.push(tokio::spawn(async move {
            let outcome = executor
                .execute(&RequestSpec::get(format!("/items/{name}")))
                .await
                .unwrap();
            (name, outcome)
        }));
    }

    for handle in handles {
        let (name, outcome) = handle.await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.text(), name);
    }
}
