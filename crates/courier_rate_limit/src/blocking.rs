//! Blocking rate limiter gate.

use crate::{PacerState, RateLimit};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument};

/// Blocking pacing gate for one client instance.
///
/// Same reservation core as [`crate::RateLimiter`], but waits with a thread
/// sleep instead of a suspension point. Multiple threads sharing one client
/// serialize their reservations through the internal mutex; the sleep itself
/// happens outside the lock so waiting threads do not convoy.
#[derive(Clone)]
pub struct BlockingRateLimiter {
    state: Arc<Mutex<PacerState>>,
}

impl std::fmt::Debug for BlockingRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingRateLimiter").finish_non_exhaustive()
    }
}

impl BlockingRateLimiter {
    /// Create a limiter for the given pacing policy.
    pub fn new(limit: RateLimit) -> Self {
        Self {
            state: Arc::new(Mutex::new(PacerState::new(limit))),
        }
    }

    /// Block the calling thread until the policy allows the next request.
    #[instrument(skip(self))]
    pub fn acquire(&self) {
        let wait = {
            let mut state = self.state.lock().expect("Pacer mutex poisoned");
            state.reserve(Instant::now())
        };

        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "Pacing request");
            std::thread::sleep(wait);
        }
    }
}
