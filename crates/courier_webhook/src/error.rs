//! Webhook error types.

/// Webhook error variants.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum WebhookErrorKind {
    /// The signature did not match the payload and secret.
    #[display("Signature verification failed")]
    InvalidSignature,

    /// The signature header value could not be decoded.
    #[display("Malformed signature: {_0}")]
    MalformedSignature(String),

    /// Verification is configured but the request carried no signature.
    #[display("Missing signature header")]
    MissingSignature,

    /// The request body was not valid JSON.
    #[display("Invalid payload: {_0}")]
    InvalidPayload(String),

    /// The payload carried no event-type field to dispatch on.
    #[display("Missing event type field '{_0}'")]
    MissingEventType(String),
}

/// Webhook error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Webhook Error: {} at line {} in {}", kind, line, file)]
pub struct WebhookError {
    kind: WebhookErrorKind,
    line: u32,
    file: &'static str,
}

impl WebhookError {
    /// Create a new WebhookError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WebhookErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WebhookErrorKind {
        &self.kind
    }
}

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;
