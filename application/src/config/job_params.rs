//! Job parameters for the outer whole-run retry.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outer retry applied to an entire scan run by the job worker.
///
/// Delay before attempt `n + 1` is `backoff_base * 2^(n - 1)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobParams {
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub queue_capacity: usize,
}

impl Default for JobParams {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(5),
            queue_capacity: 64,
        }
    }
}

impl JobParams {
    /// Delay after the given failed attempt (1-based)
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(1u32 << exponent)
    }
}
