//! Bounded retry policy for vendor rate-limit responses.

use courier_error::{CourierError, CourierErrorKind};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy for 429 responses.
///
/// Retries are bounded by an explicit attempt counter; a repeated 429 can
/// cause at most `max_retries` re-sends before the rate-limit error
/// surfaces to the caller. Each retry waits for the server-indicated
/// `Retry-After` when present, falling back to `default_backoff_ms`.
///
/// Only 429 is retried. Transport failures and 5xx responses surface
/// immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Wait before a retry when the 429 carries no usable `Retry-After`,
    /// in milliseconds.
    pub default_backoff_ms: u64,
}

impl Default for RetryPolicy {
    /// One retry, 2 second fallback backoff.
    fn default() -> Self {
        Self {
            max_retries: 1,
            default_backoff_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given retry bound and the default backoff.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Disable retries entirely; the first 429 surfaces immediately.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Override the fallback backoff.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.default_backoff_ms = backoff.as_millis() as u64;
        self
    }

    /// Wait before the next retry, honoring the server hint when present.
    pub fn backoff(&self, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or(Duration::from_millis(self.default_backoff_ms))
    }
}

/// Parse a `Retry-After` header as delta-seconds or an RFC 2822 HTTP-date.
///
/// Unparseable values are ignored (returns `None`); a date already in the
/// past yields a zero wait.
///
/// # Examples
///
/// ```
/// use courier_client::parse_retry_after;
/// use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
/// use std::time::Duration;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(RETRY_AFTER, HeaderValue::from_static("2"));
/// assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(2)));
/// ```
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let when = chrono::DateTime::parse_from_rfc2822(value).ok()?;
    let delta = when.with_timezone(&chrono::Utc) - chrono::Utc::now();
    Some(delta.to_std().unwrap_or(Duration::ZERO))
}

/// `Some(hint)` when the error is a vendor 429 (hint is the parsed
/// `Retry-After`, if any); `None` for every other failure.
pub(crate) fn retry_after_of(err: &CourierError) -> Option<Option<Duration>> {
    match err.kind() {
        CourierErrorKind::RateLimited(rate_limited) => Some(*rate_limited.retry_after()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_parse_delta_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("30"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_parse_http_date_in_future() {
        let when = chrono::Utc::now() + chrono::Duration::seconds(90);
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_str(&when.to_rfc2822()).unwrap(),
        );

        let wait = parse_retry_after(&headers).expect("date should parse");
        assert!(wait <= Duration::from_secs(90));
        assert!(wait >= Duration::from_secs(85));
    }

    #[test]
    fn test_parse_http_date_in_past_is_zero() {
        let when = chrono::Utc::now() - chrono::Duration::seconds(90);
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_str(&when.to_rfc2822()).unwrap(),
        );
        assert_eq!(parse_retry_after(&headers), Some(Duration::ZERO));
    }

    #[test]
    fn test_garbage_value_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("soon-ish"));
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_missing_header_is_none() {
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);
    }

    #[test]
    fn test_backoff_prefers_server_hint() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.backoff(Some(Duration::from_secs(7))),
            Duration::from_secs(7)
        );
        assert_eq!(policy.backoff(None), Duration::from_secs(2));
    }
}
