//! Integration tests for the async client against a mock server.

use courier_client::{AuthSpec, ClientConfig, Credential, RestClient, RetryPolicy};
use courier_error::CourierErrorKind;
use courier_rate_limit::RateLimit;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client with no pacing delay and no retries, for request-shape tests.
fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("testsvc", &server.uri(), Credential::new("tok-1").unwrap())
        .unwrap()
        .with_rate_limit(RateLimit::fixed_delay(Duration::ZERO))
        .with_retry(RetryPolicy::disabled())
}

#[tokio::test]
async fn test_get_sends_bearer_auth_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices"))
        .and(header("Authorization", "Bearer tok-1"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server)).unwrap();
    let body = client.get("/invoices", &[("page", "2")]).await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_custom_header_auth_scheme() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/validate"))
        .and(header("x-api-key", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server).with_auth(AuthSpec::header("x-api-key"));
    let client = RestClient::new(config).unwrap();
    client.get("/validate", &[]).await.unwrap();
}

#[tokio::test]
async fn test_tenant_header_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices"))
        .and(header("x-org-id", "org-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server)
        .with_tenant_header("x-org-id")
        .with_tenant_id("org-42")
        .unwrap();
    let client = RestClient::new(config).unwrap();
    client.get("/invoices", &[]).await.unwrap();
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    let payload = serde_json::json!({"amount": 100, "currency": "USD"});
    Mock::given(method("POST"))
        .and(path("/invoices"))
        .and(body_json(&payload))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "inv_1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server)).unwrap();
    let created = client.post("/invoices", &payload).await.unwrap();
    assert_eq!(created["id"], "inv_1");
}

#[tokio::test]
async fn test_delete_204_returns_empty_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/invoices/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server)).unwrap();
    let body = client.delete("/invoices/9").await.unwrap();
    assert_eq!(body, serde_json::json!({}));
}

#[tokio::test]
async fn test_401_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server)).unwrap();
    let err = client.get("/me", &[]).await.unwrap_err();
    assert!(matches!(err.kind(), CourierErrorKind::Auth(_)));
}

#[tokio::test]
async fn test_get_bytes_returns_raw_payload() {
    let server = MockServer::start().await;
    let payload: Vec<u8> = vec![1, 2, 3, 4, 5];
    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server)).unwrap();
    let bytes = client.get_bytes("/export", &[]).await.unwrap();
    assert_eq!(bytes, payload);
}

#[tokio::test]
async fn test_connection_failure_maps_to_transport_api_error() {
    // Bind an ephemeral port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = ClientConfig::new("testsvc", &dead_uri, Credential::new("tok-1").unwrap())
        .unwrap()
        .with_rate_limit(RateLimit::fixed_delay(Duration::ZERO))
        .with_retry(RetryPolicy::disabled());

    let client = RestClient::new(config).unwrap();
    let err = client.get("/anything", &[]).await.unwrap_err();
    match err.kind() {
        CourierErrorKind::Api(api) => assert_eq!(*api.status(), None),
        other => panic!("expected transport Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_repeated_429_retries_at_most_the_bound() {
    let server = MockServer::start().await;
    // Always 429; with max_retries = 2 the client sends exactly 3 requests.
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let config = test_config(&server)
        .with_retry(RetryPolicy::new(2).with_backoff(Duration::from_millis(20)));
    let client = RestClient::new(config).unwrap();

    let err = client.get("/limited", &[]).await.unwrap_err();
    assert!(matches!(err.kind(), CourierErrorKind::RateLimited(_)));
    server.verify().await;
}

#[tokio::test]
async fn test_retry_after_header_is_honored_once_then_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .expect(2)
        .mount(&server)
        .await;

    let config = test_config(&server)
        .with_retry(RetryPolicy::new(1).with_backoff(Duration::from_millis(10)));
    let client = RestClient::new(config).unwrap();

    let start = Instant::now();
    let err = client.get("/limited", &[]).await.unwrap_err();
    let elapsed = start.elapsed();

    // One retry, waited for the server-indicated second rather than the
    // 10ms fallback.
    assert!(matches!(err.kind(), CourierErrorKind::RateLimited(_)));
    assert!(elapsed >= Duration::from_millis(900), "waited {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(3), "waited {:?}", elapsed);
    server.verify().await;
}

#[tokio::test]
async fn test_429_then_success_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server).with_retry(RetryPolicy::new(1));
    let client = RestClient::new(config).unwrap();
    let body = client.get("/flaky", &[]).await.unwrap();
    assert_eq!(body["ok"], 1);
}

#[tokio::test]
async fn test_500_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server).with_retry(RetryPolicy::new(3));
    let client = RestClient::new(config).unwrap();

    let err = client.get("/broken", &[]).await.unwrap_err();
    assert!(matches!(err.kind(), CourierErrorKind::Api(_)));
    server.verify().await;
}

#[tokio::test]
async fn test_pacing_applies_between_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(3)
        .mount(&server)
        .await;

    let config = test_config(&server)
        .with_rate_limit(RateLimit::fixed_delay(Duration::from_millis(50)));
    let client = RestClient::new(config).unwrap();

    let start = Instant::now();
    for _ in 0..3 {
        client.get("/ping", &[]).await.unwrap();
    }
    assert!(
        start.elapsed() >= Duration::from_millis(100),
        "3 paced calls finished in {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn test_two_clients_have_independent_pacing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let limit = RateLimit::fixed_delay(Duration::from_millis(200));
    let a = RestClient::new(test_config(&server).with_rate_limit(limit)).unwrap();
    let b = RestClient::new(test_config(&server).with_rate_limit(limit)).unwrap();

    // Burn A's pacing budget.
    a.get("/ping", &[]).await.unwrap();

    // B's first call is unaffected by A's history.
    let start = Instant::now();
    b.get("/ping", &[]).await.unwrap();
    assert!(
        start.elapsed() < Duration::from_millis(150),
        "independent client was delayed {:?}",
        start.elapsed()
    );
}
