//! Status-code mapping tests for the response classifier.
//!
//! The classifier is transport independent, so every mapping is exercised
//! here without a server: one case per status in
//! {200, 201, 204, 401, 403, 404, 429, 500}, for JSON and non-JSON bodies.

use courier_client::{classify_bytes, classify_json};
use courier_error::{CourierErrorKind, ErrorBody};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use std::time::Duration;

fn no_headers() -> HeaderMap {
    HeaderMap::new()
}

#[test]
fn test_200_with_json_body_returns_payload() {
    let body = br#"{"id": 7, "name": "invoice"}"#;
    let value = classify_json(StatusCode::OK, &no_headers(), "/invoices/7", body).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["name"], "invoice");
}

#[test]
fn test_200_with_non_json_body_is_json_error() {
    let result = classify_json(StatusCode::OK, &no_headers(), "/x", b"<html>hi</html>");
    match result.unwrap_err().kind() {
        CourierErrorKind::Json(_) => {}
        other => panic!("expected Json error, got {:?}", other),
    }
}

#[test]
fn test_201_with_json_body_returns_payload() {
    let body = br#"{"created": true}"#;
    let value = classify_json(StatusCode::CREATED, &no_headers(), "/contacts", body).unwrap();
    assert_eq!(value["created"], true);
}

#[test]
fn test_204_empty_body_returns_empty_mapping() {
    let value = classify_json(StatusCode::NO_CONTENT, &no_headers(), "/x", b"").unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[test]
fn test_401_is_auth_error() {
    let result = classify_json(StatusCode::UNAUTHORIZED, &no_headers(), "/x", b"{}");
    match result.unwrap_err().kind() {
        CourierErrorKind::Auth(err) => assert_eq!(*err.status(), 401),
        other => panic!("expected Auth error, got {:?}", other),
    }
}

#[test]
fn test_403_is_auth_error() {
    let result = classify_json(StatusCode::FORBIDDEN, &no_headers(), "/x", b"denied");
    match result.unwrap_err().kind() {
        CourierErrorKind::Auth(err) => assert_eq!(*err.status(), 403),
        other => panic!("expected Auth error, got {:?}", other),
    }
}

#[test]
fn test_404_is_not_found_with_path() {
    let result = classify_json(StatusCode::NOT_FOUND, &no_headers(), "/invoices/9", b"");
    match result.unwrap_err().kind() {
        CourierErrorKind::NotFound(err) => assert_eq!(err.path(), "/invoices/9"),
        other => panic!("expected NotFound error, got {:?}", other),
    }
}

#[test]
fn test_429_is_rate_limited_with_retry_after() {
    let mut headers = HeaderMap::new();
    headers.insert(RETRY_AFTER, HeaderValue::from_static("2"));

    let result = classify_json(StatusCode::TOO_MANY_REQUESTS, &headers, "/x", b"{}");
    match result.unwrap_err().kind() {
        CourierErrorKind::RateLimited(err) => {
            assert_eq!(*err.retry_after(), Some(Duration::from_secs(2)));
        }
        other => panic!("expected RateLimited error, got {:?}", other),
    }
}

#[test]
fn test_429_without_retry_after() {
    let result = classify_json(StatusCode::TOO_MANY_REQUESTS, &no_headers(), "/x", b"");
    match result.unwrap_err().kind() {
        CourierErrorKind::RateLimited(err) => assert_eq!(*err.retry_after(), None),
        other => panic!("expected RateLimited error, got {:?}", other),
    }
}

#[test]
fn test_500_with_json_body_is_api_error() {
    let body = br#"{"error": "boom"}"#;
    let result = classify_json(StatusCode::INTERNAL_SERVER_ERROR, &no_headers(), "/x", body);
    match result.unwrap_err().kind() {
        CourierErrorKind::Api(err) => {
            assert_eq!(*err.status(), Some(500));
            assert_eq!(
                *err.body(),
                ErrorBody::Json(serde_json::json!({"error": "boom"}))
            );
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[test]
fn test_500_with_text_body_falls_back_to_raw_text() {
    let result = classify_json(
        StatusCode::INTERNAL_SERVER_ERROR,
        &no_headers(),
        "/x",
        b"gateway exploded",
    );
    match result.unwrap_err().kind() {
        CourierErrorKind::Api(err) => {
            assert_eq!(*err.body(), ErrorBody::Text("gateway exploded".to_string()));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[test]
fn test_bytes_success_returns_raw_body() {
    let body: &[u8] = &[0x89, 0x50, 0x4e, 0x47];
    let bytes = classify_bytes(StatusCode::OK, &no_headers(), "/export.png", body).unwrap();
    assert_eq!(bytes, body);
}

#[test]
fn test_bytes_failure_uses_same_taxonomy() {
    let result = classify_bytes(StatusCode::NOT_FOUND, &no_headers(), "/export.png", b"");
    match result.unwrap_err().kind() {
        CourierErrorKind::NotFound(_) => {}
        other => panic!("expected NotFound error, got {:?}", other),
    }
}
