//! Authentication error types.

use derive_getters::Getters;

/// Authentication failure reported by the vendor (HTTP 401 or 403).
///
/// Carries the exact status so callers can distinguish a rejected credential
/// (401) from a valid credential lacking permission (403).
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Authentication Error: HTTP {}: {} at line {} in {}", status, message, line, file)]
pub struct AuthError {
    status: u16,
    message: String,
    line: u32,
    file: &'static str,
}

impl AuthError {
    /// Create a new AuthError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier_error::AuthError;
    ///
    /// let err = AuthError::new(401, "Bearer token rejected");
    /// assert_eq!(*err.status(), 401);
    /// ```
    #[track_caller]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
