//! Client-side request pacing.
//!
//! This crate provides the rate limiting used by every Courier client to stay
//! within a vendor's (or a self-imposed) request cadence. Two pacing policies
//! are supported:
//!
//! - **Fixed minimum delay**: consecutive request starts are at least a
//!   configured interval apart (typically 100-500 ms).
//! - **Sliding-window cap**: no more than a configured number of request
//!   starts in any window of the configured duration (e.g. 3000 per hour).
//!
//! The limiter never rejects a call, it only delays it. The check-then-update
//! sequence runs as one critical section, so concurrent callers sharing a
//! limiter serialize their reservations correctly.
//!
//! Both an async gate ([`RateLimiter`], suspension points only) and a
//! blocking gate ([`BlockingRateLimiter`], thread sleeps) are built on the
//! same reservation core, so the two scheduling models cannot drift apart.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blocking;
mod limit;
mod limiter;
mod pacer;

pub use blocking::BlockingRateLimiter;
pub use limit::RateLimit;
pub use limiter::{RateLimiter, RateLimiterGuard};
pub use pacer::PacerState;
