//! Top-level error wrapper types.

use crate::{ApiError, AuthError, ConfigError, JsonError, NotFoundError, RateLimitedError};

/// The foundation error enum for the Courier workspace.
///
/// Every failure a resource method can produce maps to exactly one variant,
/// so callers write one `match` instead of catching per-vendor exception
/// types.
///
/// # Examples
///
/// ```
/// use courier_error::{CourierError, AuthError};
///
/// let auth_err = AuthError::new(403, "insufficient scope");
/// let err: CourierError = auth_err.into();
/// assert!(format!("{}", err).contains("Authentication Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CourierErrorKind {
    /// Missing or invalid construction parameter
    #[from(ConfigError)]
    Config(ConfigError),
    /// 401/403 from the vendor
    #[from(AuthError)]
    Auth(AuthError),
    /// 429 from the vendor
    #[from(RateLimitedError)]
    RateLimited(RateLimitedError),
    /// 404 from the vendor
    #[from(NotFoundError)]
    NotFound(NotFoundError),
    /// Any other non-2xx status, or a transport-level failure
    #[from(ApiError)]
    Api(ApiError),
    /// Undecodable 2xx response body
    #[from(JsonError)]
    Json(JsonError),
}

/// Courier error with kind discrimination.
///
/// # Examples
///
/// ```
/// use courier_error::{CourierResult, ConfigError};
///
/// fn might_fail() -> CourierResult<()> {
///     Err(ConfigError::new("Missing credential"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Courier Error: {}", _0)]
pub struct CourierError(Box<CourierErrorKind>);

impl CourierError {
    /// Create a new error from a kind.
    pub fn new(kind: CourierErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CourierErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CourierErrorKind
impl<T> From<T> for CourierError
where
    T: Into<CourierErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Courier operations.
///
/// # Examples
///
/// ```
/// use courier_error::{CourierResult, NotFoundError};
///
/// fn fetch_invoice() -> CourierResult<String> {
///     Err(NotFoundError::new("/invoices/42"))?
/// }
/// ```
pub type CourierResult<T> = std::result::Result<T, CourierError>;
