//! Fixed-interval pacing for outbound probe requests.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Enforces a fixed delay between consecutive acquisitions.
///
/// The first `acquire` returns immediately. Every later one waits until
/// `delay` has passed since the previous acquisition. Callers are expected to
/// run sequentially; the lock only keeps the bookkeeping consistent.
pub struct Throttle {
    delay: Duration,
    /// When the last request was let through.
    last: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last: Mutex::new(None),
        }
    }

    /// Waits for the next slot, then records it.
    pub async fn acquire(&self) {
        let mut last = self.last.lock().await;
        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.delay {
                sleep(self.delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
