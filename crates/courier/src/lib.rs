//! Courier - a rate-limited REST client core for SaaS APIs
//!
//! Courier collapses the per-vendor HTTP wrapper pattern into one tested
//! core: a persistent connection pool, a client-side pacing gate, a uniform
//! response-to-error classifier, a bounded 429 retry, and webhook
//! verification/dispatch, parameterized per vendor by a small service
//! descriptor instead of a copy-pasted class.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use courier::{ClientConfig, Credential, RestClient, ServiceRegistry};
//!
//! #[tokio::main]
//! async fn main() -> courier::CourierResult<()> {
//!     let registry = ServiceRegistry::load()?;
//!     let descriptor = registry.get("freshbooks").expect("bundled descriptor");
//!
//!     let config = ClientConfig::from_descriptor(
//!         "freshbooks",
//!         descriptor,
//!         Credential::from_env("FRESHBOOKS_API_KEY")?,
//!     )?;
//!     let client = RestClient::new(config)?;
//!
//!     let invoices = client.get("/invoices", &[("page", "1")]).await?;
//!     println!("{}", invoices);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Courier is organized as a workspace with focused crates:
//!
//! - `courier_error` - the shared error taxonomy
//! - `courier_rate_limit` - fixed-delay and sliding-window pacing
//! - `courier_client` - service descriptors, classifier, async and
//!   blocking clients
//! - `courier_webhook` - HMAC verification and event dispatch
//!
//! This crate (`courier`) re-exports everything for convenience, plus an
//! [`observability`] module for wiring up tracing output.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod observability;

pub use courier_client::*;
pub use courier_error::*;
pub use courier_rate_limit::*;
pub use courier_webhook::*;
