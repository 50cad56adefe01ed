//! Vendor rate-limit error types.

use derive_getters::Getters;
use std::fmt;
use std::time::Duration;

/// Vendor-side rate limit response (HTTP 429).
///
/// Distinct from the client-side rate limiter in `courier_rate_limit`, which
/// only ever delays calls and never produces an error. This error surfaces
/// after any configured retries on 429 are exhausted.
#[derive(Debug, Clone, Getters)]
pub struct RateLimitedError {
    /// Server-indicated wait before retrying, if the response carried a
    /// parseable `Retry-After` header.
    retry_after: Option<Duration>,
    message: String,
    line: u32,
    file: &'static str,
}

impl RateLimitedError {
    /// Create a new RateLimitedError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier_error::RateLimitedError;
    /// use std::time::Duration;
    ///
    /// let err = RateLimitedError::new(Some(Duration::from_secs(2)), "quota exhausted");
    /// assert_eq!(*err.retry_after(), Some(Duration::from_secs(2)));
    /// ```
    #[track_caller]
    pub fn new(retry_after: Option<Duration>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            retry_after,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl fmt::Display for RateLimitedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.retry_after {
            Some(wait) => write!(
                f,
                "Rate Limited: HTTP 429, retry after {}s: {} at line {} in {}",
                wait.as_secs(),
                self.message,
                self.line,
                self.file
            ),
            None => write!(
                f,
                "Rate Limited: HTTP 429: {} at line {} in {}",
                self.message, self.line, self.file
            ),
        }
    }
}

impl std::error::Error for RateLimitedError {}
