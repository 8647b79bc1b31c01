//! Explicit retry policy for network calls

use std::thread;
use std::time::Duration;

use super::HttpError;

/// Retry with exponential backoff, applied uniformly to any network call.
///
/// Only transient errors are retried; anything else fails immediately.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Run `op`, retrying transient failures until the attempt cap is hit.
    /// Returns the last error on exhaustion.
    pub fn run<T, F>(&self, mut op: F) -> Result<T, HttpError>
    where
        F: FnMut() -> Result<T, HttpError>,
    {
        let mut delay = self.base_delay;
        let attempts = self.max_attempts.max(1);

        for attempt in 1..=attempts {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < attempts => {
                    tracing::debug!(attempt, error = %err, "transient failure, retrying");
                    thread::sleep(delay);
                    delay = delay.mul_f64(self.multiplier);
                }
                Err(err) => return Err(err),
            }
        }

        unreachable!("retry loop always returns")
    }
}
