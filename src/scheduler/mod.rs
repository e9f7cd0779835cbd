//! Shared admission gate for outbound requests.
//!
//! Every provider call passes through one [`RequestScheduler`], which
//! enforces a concurrency cap and a rolling-window rate cap. Requests are
//! admitted in submission order; a task that fails releases its slot and
//! propagates its error without affecting the rest of the queue.
//!
//! Admission is serialized through an async mutex, so two submissions can
//! never observe the same free window slot and both proceed. A submission
//! waiting for quota holds the admission lock while it sleeps, which keeps
//! every later submission queued behind it in FIFO order.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio::time::Instant;
use tracing::debug;

/// Admission gate configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Maximum requests in flight at once
    pub max_concurrent: usize,
    /// Length of the rolling rate window
    pub window: Duration,
    /// Admissions allowed per rolling window
    pub window_cap: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            window: Duration::from_millis(1_000),
            window_cap: 30,
        }
    }
}

/// Timestamps of admissions inside the current rolling window.
struct AdmissionWindow {
    admitted: VecDeque<Instant>,
}

/// FIFO admission gate combining a concurrency cap with a rolling-window
/// rate cap.
///
/// Constructed once and owned by the provider; never a hidden global.
pub struct RequestScheduler {
    semaphore: Arc<Semaphore>,
    window: Mutex<AdmissionWindow>,
    config: SchedulerConfig,
}

impl RequestScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        // A zero cap would never admit anything; clamp both to one.
        let config = SchedulerConfig {
            max_concurrent: config.max_concurrent.max(1),
            window_cap: config.window_cap.max(1),
            ..config
        };

        Self {
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
            window: Mutex::new(AdmissionWindow {
                admitted: VecDeque::with_capacity(config.window_cap),
            }),
            config,
        }
    }

    /// Run `task` once a concurrency slot and rate-window quota are free.
    ///
    /// The task does not start until admitted; retries inside the task run
    /// within the same admission slot. The task's output, success or error,
    /// propagates to the submitter unchanged.
    pub async fn run<T, F, Fut>(&self, task: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        // Semaphore acquisition is FIFO, so submission order is preserved.
        // The semaphore is never closed.
        let _permit = self
            .semaphore
            .acquire()
            .await
            .expect("scheduler semaphore closed");

        self.admit().await;

        debug!(
            in_flight = self.config.max_concurrent - self.semaphore.available_permits(),
            "Request admitted"
        );

        task().await
        // Dropping the permit frees the concurrency slot, whatever the outcome.
    }

    /// Wait until the rolling window has quota, then consume one slot.
    async fn admit(&self) {
        let mut window = self.window.lock().await;

        loop {
            let now = Instant::now();
            while window
                .admitted
                .front()
                .is_some_and(|&t| now.duration_since(t) >= self.config.window)
            {
                window.admitted.pop_front();
            }

            if window.admitted.len() < self.config.window_cap {
                window.admitted.push_back(now);
                return;
            }

            // Quota exhausted: sleep until the oldest admission rolls out of
            // the window. The lock stays held, keeping the queue FIFO.
            let wakeup = window.admitted[0] + self.config.window;
            tokio::time::sleep_until(wakeup).await;
        }
    }
}
