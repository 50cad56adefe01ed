//! Error types for the Courier library.
//!
//! This crate provides the shared error taxonomy used by every Courier crate,
//! flattening the per-vendor exception zoo into one hierarchy callers can
//! match on regardless of which service a client talks to.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*Error` structs capture one failure category with source location
//! - `CourierErrorKind` enumerates the categories
//! - `CourierError` wraps the kind for uniform propagation with `?`
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use courier_error::{CourierResult, AuthError};
//!
//! fn fetch_data() -> CourierResult<String> {
//!     Err(AuthError::new(401, "Bearer token rejected"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod auth;
mod config;
mod error;
mod json;
mod not_found;
mod rate_limited;

pub use api::{ApiError, ErrorBody};
pub use auth::AuthError;
pub use config::ConfigError;
pub use error::{CourierError, CourierErrorKind, CourierResult};
pub use json::JsonError;
pub use not_found::NotFoundError;
pub use rate_limited::RateLimitedError;
