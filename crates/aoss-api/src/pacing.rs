use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// Minimum-interval request pacing.
///
/// Tracks when the previous request finished and makes the next one wait
/// until `interval` has passed. Built on the tokio clock, so a paused test
/// runtime drives it deterministically.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the next request may start.
    pub async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }
        if let Some(last) = self.last {
            let ready = last + self.interval;
            if ready > Instant::now() {
                trace!(interval_ms = self.interval.as_millis(), "pacing request");
                tokio::time::sleep_until(ready).await;
            }
        }
    }

    /// Record that a request just finished.
    pub fn finish(&mut self) {
        self.last = Some(Instant::now());
    }
}
