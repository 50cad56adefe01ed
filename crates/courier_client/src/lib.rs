//! Generic rate-limited REST client core.
//!
//! This crate collapses the repeated per-vendor wrapper pattern into one
//! tested client: a persistent connection pool, a pacing gate, a response
//! classifier, and a bounded 429 retry, parameterized by a small per-vendor
//! [`ServiceDescriptor`] (base URL, auth header shape, pacing policy).
//!
//! Two scheduling models are supported, chosen at construction time rather
//! than by duplicating the client:
//! - [`RestClient`]: async, where pacing waits and I/O are suspension points.
//! - [`BlockingRestClient`]: synchronous, blocking the calling thread.
//!
//! Every resource call follows the same contract: acquire the pacing gate,
//! build the request, send it through the shared pool, classify the
//! response, and return decoded JSON, never the raw transport response.
//!
//! # Example
//!
//! ```rust,ignore
//! use courier_client::{ClientConfig, Credential, RestClient, ServiceRegistry};
//!
//! #[tokio::main]
//! async fn main() -> courier_error::CourierResult<()> {
//!     let registry = ServiceRegistry::load()?;
//!     let descriptor = registry.get("zerobounce").expect("bundled descriptor");
//!     let credential = Credential::from_env("ZEROBOUNCE_API_KEY")?;
//!
//!     let config = ClientConfig::from_descriptor("zerobounce", descriptor, credential)?;
//!     let client = RestClient::new(config)?;
//!
//!     let body = client.get("/validate", &[("email", "a@example.com")]).await?;
//!     println!("{}", body);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod blocking;
mod classify;
mod client;
mod config;
mod descriptor;
mod retry;

pub use auth::{AuthScheme, AuthSpec, Credential};
pub use blocking::BlockingRestClient;
pub use classify::{classify_bytes, classify_json};
pub use client::RestClient;
pub use config::ClientConfig;
pub use descriptor::{ServiceDescriptor, ServiceRegistry};
pub use retry::{RetryPolicy, parse_retry_after};
