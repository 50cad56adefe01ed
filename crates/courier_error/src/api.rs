//! Generic API error types.

use derive_getters::Getters;
use std::fmt;

/// Error payload attached to a failed API call.
///
/// Vendors disagree on error body shape, so the classifier keeps whatever it
/// received: decoded JSON when the body parses, raw text when it does not,
/// and `Empty` for bodyless failures.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// Error body decoded as JSON.
    Json(serde_json::Value),
    /// Error body that was not valid JSON, kept as raw text.
    Text(String),
    /// No body was present.
    Empty,
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBody::Json(value) => write!(f, "{}", value),
            ErrorBody::Text(text) => write!(f, "{}", text),
            ErrorBody::Empty => write!(f, "<empty body>"),
        }
    }
}

/// Generic API failure: any non-2xx status not covered by a finer category,
/// or a transport-level failure (timeout, connection refused, DNS).
///
/// Transport failures carry `status: None` so callers have a single taxonomy
/// to catch regardless of whether the request reached the server.
#[derive(Debug, Clone, Getters)]
pub struct ApiError {
    /// HTTP status code, or `None` for transport-level failures.
    status: Option<u16>,
    /// Parsed or raw error body.
    body: ErrorBody,
    message: String,
    line: u32,
    file: &'static str,
}

impl ApiError {
    /// Create a new ApiError for an HTTP status with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier_error::{ApiError, ErrorBody};
    ///
    /// let err = ApiError::new(500, ErrorBody::Text("oops".into()), "server error");
    /// assert_eq!(*err.status(), Some(500));
    /// ```
    #[track_caller]
    pub fn new(status: u16, body: ErrorBody, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status: Some(status),
            body,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a new ApiError for a transport-level failure (no HTTP status).
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status: None,
            body: ErrorBody::Empty,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "API Error: HTTP {}: {} ({}) at line {} in {}",
                status, self.message, self.body, self.line, self.file
            ),
            None => write!(
                f,
                "API Error: transport failure: {} at line {} in {}",
                self.message, self.line, self.file
            ),
        }
    }
}

impl std::error::Error for ApiError {}
