//! Pacing policy configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pacing policy for a client instance.
///
/// Serializes to/from service descriptor TOML, so intervals are plain
/// integers rather than nested duration tables:
///
/// ```toml
/// rate_limit = { kind = "fixed_delay", min_interval_ms = 200 }
/// ```
///
/// or
///
/// ```toml
/// rate_limit = { kind = "sliding_window", max_requests = 3000, window_ms = 3600000 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateLimit {
    /// Consecutive request starts at least `min_interval_ms` apart.
    FixedDelay {
        /// Minimum gap between request starts, in milliseconds.
        min_interval_ms: u64,
    },
    /// At most `max_requests` request starts in any `window_ms` span.
    SlidingWindow {
        /// Maximum request starts per window.
        max_requests: u32,
        /// Window length in milliseconds.
        window_ms: u64,
    },
}

impl RateLimit {
    /// Fixed minimum-delay policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier_rate_limit::RateLimit;
    /// use std::time::Duration;
    ///
    /// let limit = RateLimit::fixed_delay(Duration::from_millis(200));
    /// assert_eq!(limit, RateLimit::FixedDelay { min_interval_ms: 200 });
    /// ```
    pub fn fixed_delay(min_interval: Duration) -> Self {
        Self::FixedDelay {
            min_interval_ms: min_interval.as_millis() as u64,
        }
    }

    /// Sliding-window cap policy.
    ///
    /// Millisecond resolution, so sub-second windows pace correctly.
    pub fn sliding_window(max_requests: u32, window: Duration) -> Self {
        Self::SlidingWindow {
            max_requests,
            window_ms: window.as_millis() as u64,
        }
    }

    /// Minimum inter-request interval, for fixed-delay policies.
    pub fn min_interval(&self) -> Option<Duration> {
        match self {
            Self::FixedDelay { min_interval_ms } => Some(Duration::from_millis(*min_interval_ms)),
            Self::SlidingWindow { .. } => None,
        }
    }

    /// Window length, for sliding-window policies.
    pub fn window(&self) -> Option<Duration> {
        match self {
            Self::FixedDelay { .. } => None,
            Self::SlidingWindow { window_ms, .. } => Some(Duration::from_millis(*window_ms)),
        }
    }
}
