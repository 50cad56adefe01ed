//! Async rate limiter gate.

use crate::{PacerState, RateLimit};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, instrument};

/// Async pacing gate for one client instance.
///
/// Wraps a [`PacerState`] in an async mutex so the check-then-update
/// reservation is atomic across tasks, then sleeps cooperatively for the
/// owed wait. The limiter never rejects a call.
///
/// An optional concurrency cap bounds in-flight requests via a Tokio
/// semaphore; the returned guard releases the slot on drop.
///
/// Cloning shares pacing state. Independent client instances must build
/// independent limiters so one instance's call history never delays
/// another's.
///
/// # Example
///
/// ```rust,ignore
/// use courier_rate_limit::{RateLimit, RateLimiter};
/// use std::time::Duration;
///
/// let limiter = RateLimiter::new(RateLimit::fixed_delay(Duration::from_millis(200)));
///
/// let _guard = limiter.acquire().await;
/// // Send the request...
/// // Guard drop releases the concurrent slot (if a cap is configured).
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    state: Arc<Mutex<PacerState>>,
    concurrent_semaphore: Option<Arc<Semaphore>>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_concurrent", &self.concurrent_semaphore.is_some())
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    /// Create a limiter for the given pacing policy.
    pub fn new(limit: RateLimit) -> Self {
        Self {
            state: Arc::new(Mutex::new(PacerState::new(limit))),
            concurrent_semaphore: None,
        }
    }

    /// Bound the number of in-flight requests.
    ///
    /// Slots are acquired after the pacing wait, so a slow response does not
    /// hold a slot while other callers sit in the pacing queue.
    pub fn with_max_concurrent(mut self, max_concurrent: u32) -> Self {
        self.concurrent_semaphore = Some(Arc::new(Semaphore::new(max_concurrent as usize)));
        self
    }

    /// Acquire pacing permission for one request.
    ///
    /// Suspends the calling task until the policy allows the request to
    /// start, then acquires a concurrency slot if a cap is configured.
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> RateLimiterGuard {
        let wait = {
            let mut state = self.state.lock().await;
            state.reserve(tokio::time::Instant::now().into_std())
        };

        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "Pacing request");
            tokio::time::sleep(wait).await;
        }

        // Acquire the concurrent slot last to avoid holding it while waiting.
        let permit = match &self.concurrent_semaphore {
            Some(semaphore) => Some(
                semaphore
                    .clone()
                    .acquire_owned()
                    .await
                    .expect("Semaphore should not be closed"),
            ),
            None => None,
        };

        RateLimiterGuard { _permit: permit }
    }
}

/// RAII guard for the async limiter.
///
/// Automatically releases the concurrent request slot when dropped, so the
/// slot is returned even if the request fails or the task panics.
pub struct RateLimiterGuard {
    _permit: Option<tokio::sync::OwnedSemaphorePermit>,
}
