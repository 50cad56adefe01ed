//! Response classification.
//!
//! Converts a raw HTTP response (status, headers, body bytes) into either a
//! decoded payload or a typed failure. The classifier is transport
//! independent: both the async and blocking clients feed it the same three
//! pieces, and tests can exercise every mapping without a server.
//!
//! Policy (uniform across all services):
//! - 2xx with a body: parse as JSON
//! - 2xx with an empty body (204): return an empty mapping
//! - 401/403: [`AuthError`]
//! - 404: [`NotFoundError`]
//! - 429: [`RateLimitedError`] carrying any parseable `Retry-After`
//! - any other >= 400: [`ApiError`] with the parsed or raw error body

use crate::parse_retry_after;
use courier_error::{
    ApiError, AuthError, CourierError, CourierResult, ErrorBody, JsonError, NotFoundError,
    RateLimitedError,
};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tracing::debug;

/// Classify a response whose payload is JSON.
///
/// `path` is the request path, used for 404 reporting.
pub fn classify_json(
    status: StatusCode,
    headers: &HeaderMap,
    path: &str,
    body: &[u8],
) -> CourierResult<serde_json::Value> {
    if status.is_success() {
        if body.is_empty() {
            // 204 and friends: stable empty-mapping contract.
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }
        return serde_json::from_slice(body).map_err(|e| {
            CourierError::from(JsonError::new(format!(
                "Failed to decode response body: {}",
                e
            )))
        });
    }
    Err(classify_failure(status, headers, path, body))
}

/// Classify a response whose payload is raw bytes (file/binary endpoints).
pub fn classify_bytes(
    status: StatusCode,
    headers: &HeaderMap,
    path: &str,
    body: &[u8],
) -> CourierResult<Vec<u8>> {
    if status.is_success() {
        return Ok(body.to_vec());
    }
    Err(classify_failure(status, headers, path, body))
}

/// Map a non-2xx response to the error taxonomy.
fn classify_failure(
    status: StatusCode,
    headers: &HeaderMap,
    path: &str,
    body: &[u8],
) -> CourierError {
    debug!(status = status.as_u16(), path, "Classifying failed response");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AuthError::new(status.as_u16(), reason(status)).into()
        }
        StatusCode::NOT_FOUND => NotFoundError::new(path).into(),
        StatusCode::TOO_MANY_REQUESTS => {
            RateLimitedError::new(parse_retry_after(headers), reason(status)).into()
        }
        _ => ApiError::new(status.as_u16(), error_body(body), reason(status)).into(),
    }
}

/// Keep whatever error body the vendor sent: JSON when it parses, raw text
/// otherwise.
fn error_body(body: &[u8]) -> ErrorBody {
    if body.is_empty() {
        return ErrorBody::Empty;
    }
    match serde_json::from_slice(body) {
        Ok(value) => ErrorBody::Json(value),
        Err(_) => ErrorBody::Text(String::from_utf8_lossy(body).into_owned()),
    }
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
