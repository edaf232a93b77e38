//! Scan parameters: fan-out and retry control.

use brandlens_domain::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for one provider fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanParams {
    /// Per-provider attempt budget and flat delay
    pub retry: RetryPolicy,
    /// Sampling temperature forwarded to providers that accept one
    pub temperature: Option<f32>,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            temperature: None,
        }
    }
}

impl ScanParams {
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.retry = RetryPolicy::new(max, self.retry.delay);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry = RetryPolicy::new(self.retry.max_attempts, delay);
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}
