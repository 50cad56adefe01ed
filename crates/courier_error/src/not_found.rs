//! Not-found error types.

use derive_getters::Getters;

/// Resource not found (HTTP 404).
///
/// Split out from the generic [`crate::ApiError`] because "the record does
/// not exist" is the one non-2xx outcome callers routinely branch on.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Not Found: {} at line {} in {}", path, line, file)]
pub struct NotFoundError {
    /// Request path that produced the 404
    path: String,
    line: u32,
    file: &'static str,
}

impl NotFoundError {
    /// Create a new NotFoundError with automatic location tracking.
    #[track_caller]
    pub fn new(path: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            path: path.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
