//! Event dispatch table.

use crate::{WebhookError, WebhookErrorKind, WebhookResult, WebhookVerifier};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Callback invoked with the decoded webhook payload.
type Callback = Box<dyn Fn(&Value) + Send + Sync>;

/// Outcome of dispatching one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A registered callback handled the event.
    Handled {
        /// The event type that was dispatched.
        event_type: String,
    },
    /// No callback is registered for the event type. Not an error: vendors
    /// add event types without notice and receivers ignore what they don't
    /// subscribe to.
    Unhandled {
        /// The event type that had no registered callback.
        event_type: String,
    },
}

/// Observer/dispatch table for inbound webhook events.
///
/// Callbacks are registered per event-type string and invoked synchronously
/// with the decoded JSON payload. When a verifier is attached, the raw body
/// is authenticated before anything is parsed.
///
/// # Example
///
/// ```
/// use courier_webhook::{Dispatch, WebhookRouter};
///
/// let mut router = WebhookRouter::new();
/// router.on("invoice.paid", |payload| {
///     println!("paid: {}", payload["id"]);
/// });
///
/// let outcome = router
///     .dispatch(br#"{"event_type": "invoice.paid", "id": 7}"#, None)
///     .unwrap();
/// assert_eq!(outcome, Dispatch::Handled { event_type: "invoice.paid".into() });
/// ```
#[derive(Default)]
pub struct WebhookRouter {
    verifier: Option<WebhookVerifier>,
    handlers: HashMap<String, Callback>,
    event_field: Option<String>,
}

impl std::fmt::Debug for WebhookRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookRouter")
            .field("verified", &self.verifier.is_some())
            .field("registered", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

impl WebhookRouter {
    /// Create an empty router with no signature verification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require every delivery to carry a valid signature.
    pub fn with_verifier(mut self, verifier: WebhookVerifier) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Override the payload field naming the event type (default
    /// `event_type`).
    pub fn with_event_field(mut self, field: impl Into<String>) -> Self {
        self.event_field = Some(field.into());
        self
    }

    /// Register a callback for an event type, replacing any previous
    /// registration for the same type.
    pub fn on(&mut self, event_type: impl Into<String>, callback: impl Fn(&Value) + Send + Sync + 'static) {
        self.handlers.insert(event_type.into(), Box::new(callback));
    }

    /// Verify, decode, and dispatch one delivery.
    ///
    /// `signature` is the value of the vendor's signature header; it is
    /// required when a verifier is attached and ignored otherwise.
    ///
    /// # Errors
    ///
    /// Fails on signature problems, non-JSON bodies, and payloads missing
    /// the event-type field. An unregistered event type is not an error; it
    /// reports as [`Dispatch::Unhandled`].
    #[instrument(skip(self, raw_body, signature))]
    pub fn dispatch(&self, raw_body: &[u8], signature: Option<&str>) -> WebhookResult<Dispatch> {
        if let Some(verifier) = &self.verifier {
            let signature = signature
                .ok_or_else(|| WebhookError::new(WebhookErrorKind::MissingSignature))?;
            verifier.verify(raw_body, signature)?;
        }

        let payload: Value = serde_json::from_slice(raw_body).map_err(|e| {
            WebhookError::new(WebhookErrorKind::InvalidPayload(e.to_string()))
        })?;

        let field = self.event_field.as_deref().unwrap_or("event_type");
        let event_type = payload
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                WebhookError::new(WebhookErrorKind::MissingEventType(field.to_string()))
            })?
            .to_string();

        match self.handlers.get(&event_type) {
            Some(callback) => {
                debug!(event_type, "Dispatching webhook event");
                callback(&payload);
                Ok(Dispatch::Handled { event_type })
            }
            None => {
                debug!(event_type, "No handler registered for event");
                Ok(Dispatch::Unhandled { event_type })
            }
        }
    }
}
