//! Reservation core shared by the async and blocking gates.

use crate::RateLimit;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Pacing state for one client instance.
///
/// `reserve` both computes the wait a caller owes and records the reserved
/// request start, in a single step. The caller must hold the state under a
/// mutex for the duration of the call so the check-then-update is atomic;
/// after that the caller sleeps outside the lock.
///
/// State is owned exclusively by one limiter. Two clients built from the
/// same configuration get independent `PacerState` values, so one client's
/// call history never delays another's.
#[derive(Debug)]
pub struct PacerState {
    limit: RateLimit,
    /// Most recent reserved start, for fixed-delay pacing.
    last_request: Option<Instant>,
    /// Reserved starts still inside (or ahead of) the window, sorted
    /// ascending, for sliding-window pacing.
    window: VecDeque<Instant>,
}

impl PacerState {
    /// Create pacing state for the given policy.
    pub fn new(limit: RateLimit) -> Self {
        Self {
            limit,
            last_request: None,
            window: VecDeque::new(),
        }
    }

    /// The policy this state enforces.
    pub fn limit(&self) -> &RateLimit {
        &self.limit
    }

    /// Reserve the next request start and return how long the caller must
    /// wait before sending.
    ///
    /// `now` is the caller's current instant. The returned duration is zero
    /// when the request may start immediately.
    pub fn reserve(&mut self, now: Instant) -> Duration {
        let start = match self.limit {
            RateLimit::FixedDelay { min_interval_ms } => {
                let min_interval = Duration::from_millis(min_interval_ms);
                let start = match self.last_request {
                    Some(last) => (last + min_interval).max(now),
                    None => now,
                };
                self.last_request = Some(start);
                start
            }
            RateLimit::SlidingWindow {
                max_requests,
                window_ms,
            } => {
                let window = Duration::from_millis(window_ms);
                let max = (max_requests as usize).max(1);

                // Entries that left the window before `now` can never
                // constrain a future start.
                while let Some(&oldest) = self.window.front() {
                    if oldest + window <= now {
                        self.window.pop_front();
                    } else {
                        break;
                    }
                }

                let start = if self.window.len() < max {
                    now
                } else {
                    // The new start must wait until only max - 1 reserved
                    // starts remain inside its window.
                    let blocking = self.window[self.window.len() - max];
                    (blocking + window).max(now)
                };
                self.window.push_back(start);
                start
            }
        };
        start.saturating_duration_since(now)
    }
}
