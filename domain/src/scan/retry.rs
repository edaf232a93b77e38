//! Per-provider retry policy and attempt lifecycle.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default attempt budget per provider per run
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Default flat pause between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Lifecycle of one provider's retry loop.
///
/// ```text
/// Pending -> Attempting -> Succeeded
///                |
///                +-> RetryScheduled -> Attempting ...
///                |
///                +-> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptState {
    Pending,
    Attempting { attempt: u32 },
    RetryScheduled { next_attempt: u32 },
    Succeeded { attempts: u32 },
    Failed { attempts: u32 },
}

impl AttemptState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AttemptState::Succeeded { .. } | AttemptState::Failed { .. }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptState::Pending => "pending",
            AttemptState::Attempting { .. } => "attempting",
            AttemptState::RetryScheduled { .. } => "retry_scheduled",
            AttemptState::Succeeded { .. } => "succeeded",
            AttemptState::Failed { .. } => "failed",
        }
    }
}

/// Bounded, flat-delay retry policy.
///
/// Transport errors and extraction errors share the same budget and the
/// same delay; the two failure classes are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Same budget, no pause between attempts
    pub fn without_delay(self) -> Self {
        Self {
            delay: Duration::ZERO,
            ..self
        }
    }

    /// State to move to after `attempt` (1-based) failed
    pub fn after_failure(&self, attempt: u32) -> AttemptState {
        if attempt < self.max_attempts {
            AttemptState::RetryScheduled {
                next_attempt: attempt + 1,
            }
        } else {
            AttemptState::Failed { attempts: attempt }
        }
    }
}
