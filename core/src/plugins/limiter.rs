//! Concurrency limiter wrapped around every network call.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Default number of concurrent fetches.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Caps how many wrapped futures run at the same time.
///
/// Clones share the same permits, so one limiter handed to several plugins
/// bounds them together.
#[derive(Debug, Clone)]
pub struct Limiter {
    permits: Option<Arc<Semaphore>>,
}

impl Limiter {
    /// Allows at most `max` concurrent tasks (at least one).
    pub fn new(max: usize) -> Self {
        Self {
            permits: Some(Arc::new(Semaphore::new(max.max(1)))),
        }
    }

    /// No limit at all.
    pub fn unbounded() -> Self {
        Self { permits: None }
    }

    /// Runs `task` once a permit is available.
    pub async fn run<F: Future>(&self, task: F) -> F::Output {
        // The semaphore is never closed, so a failed acquire cannot happen in practice.
        let _permit = match &self.permits {
            Some(permits) => permits.acquire().await.ok(),
            None => None,
        };
        task.await
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}
