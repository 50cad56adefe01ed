//! Inbound webhook handling.
//!
//! A minority of services push events back over HTTP. This crate provides
//! the two pieces those integrations share:
//!
//! - [`WebhookVerifier`]: HMAC signature verification over the raw request
//!   body with a shared secret, constant-time comparison, configurable
//!   digest (SHA-256 by default).
//! - [`WebhookRouter`]: an observer/dispatch table mapping an `event_type`
//!   string to a registered callback, invoked synchronously with the decoded
//!   payload. Unregistered event types are reported as unhandled rather than
//!   raising.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dispatch;
mod error;
mod signature;

pub use dispatch::{Dispatch, WebhookRouter};
pub use error::{WebhookError, WebhookErrorKind, WebhookResult};
pub use signature::{SignatureScheme, WebhookVerifier};
