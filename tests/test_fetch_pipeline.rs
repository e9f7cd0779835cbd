use mcp_rivals::fetch::{FetchError, RetryConfig, RetryPolicy, Transport, TransportConfig};
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipeline(retries: u32, timeout: Duration) -> (Transport, RetryPolicy) {
    let transport = Transport::new(TransportConfig { timeout }).unwrap();
    let retry = RetryPolicy::new(RetryConfig {
        retries,
        retry_delay: Duration::from_millis(10),
    });
    (transport, retry)
}

fn endpoint(mock_server: &MockServer, segment: &str) -> Url {
    Url::parse(&format!("{}/{segment}", mock_server.uri())).unwrap()
}

#[tokio::test]
async fn test_recovers_from_server_errors_within_budget() {
    let mock_server = MockServer::start().await;

    // Two 500s, then success
    Mock::given(method("GET"))
        .and(path("/heroes"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/heroes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "1"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (transport, retry) = pipeline(3, Duration::from_secs(2));
    let url = endpoint(&mock_server, "heroes");

    let body = retry.execute(|| transport.send(url.clone())).await.unwrap();
    let decoded: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(decoded, json!([{"id": "1"}]));
}

#[tokio::test]
async fn test_server_error_surfaces_after_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/heroes"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&mock_server)
        .await;

    let (transport, retry) = pipeline(3, Duration::from_secs(2));
    let url = endpoint(&mock_server, "heroes");

    let err = retry
        .execute(|| transport.send(url.clone()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/heroes"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (transport, retry) = pipeline(3, Duration::from_secs(2));
    let url = endpoint(&mock_server, "heroes");

    let err = retry
        .execute(|| transport.send(url.clone()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_rate_limit_honors_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/heroes"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/heroes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    // A 5s backoff base would dominate the test if Retry-After were ignored
    let transport = Transport::new(TransportConfig {
        timeout: Duration::from_secs(2),
    })
    .unwrap();
    let retry = RetryPolicy::new(RetryConfig {
        retries: 3,
        retry_delay: Duration::from_secs(5),
    });
    let url = endpoint(&mock_server, "heroes");

    let started = std::time::Instant::now();
    retry.execute(|| transport.send(url.clone())).await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_persistent_rate_limit_exhausts_to_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/heroes"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let (transport, retry) = pipeline(2, Duration::from_secs(2));
    let url = endpoint(&mock_server, "heroes");

    let err = retry
        .execute(|| transport.send(url.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::RateLimited { attempts: 3 }));
}

#[tokio::test]
async fn test_timeout_is_terminal_after_one_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/heroes"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (transport, retry) = pipeline(3, Duration::from_millis(100));
    let url = endpoint(&mock_server, "heroes");

    let err = retry
        .execute(|| transport.send(url.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Timeout { timeout_ms: 100 }));
}
