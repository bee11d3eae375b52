use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Keeps consecutive requests at least `min_interval` apart
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval: Duration::from_millis(min_interval_ms),
            last_request: None,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(ready_at) = self.next_slot() {
            sleep_until(ready_at).await;
        }
        self.last_request = Some(Instant::now());
    }

    fn next_slot(&self) -> Option<Instant> {
        self.last_request
            .map(|last| last + self.min_interval)
            .filter(|ready_at| *ready_at > Instant::now())
    }
}
