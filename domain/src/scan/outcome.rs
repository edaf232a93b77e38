//! Per-provider outcomes of one orchestration run.
//!
//! Exactly one [`ProviderOutcome`] exists per configured provider per run.
//! Outcomes are produced by independent tasks and never change once
//! settled.

use crate::core::provider::ProviderId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A provider that produced a schema-valid payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSuccess<T> {
    pub provider_id: ProviderId,
    pub payload: T,
    /// Model name reported by the provider
    pub raw_model_name: String,
    /// Wall time of the successful attempt
    pub latency: Duration,
    /// Attempts used, including the successful one
    pub attempts: u32,
}

/// Terminal record for a provider whose retry budget is exhausted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub provider_id: ProviderId,
    /// Message of the last failed attempt
    pub reason: String,
}

impl ProviderFailure {
    pub fn new(provider_id: ProviderId, reason: impl Into<String>) -> Self {
        Self {
            provider_id,
            reason: reason.into(),
        }
    }
}

/// Settled result of one provider's retry loop
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome<T> {
    Success(ProviderSuccess<T>),
    Failure(ProviderFailure),
}

impl<T> ProviderOutcome<T> {
    pub fn provider_id(&self) -> &ProviderId {
        match self {
            ProviderOutcome::Success(s) => &s.provider_id,
            ProviderOutcome::Failure(f) => &f.provider_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderOutcome::Success(_))
    }
}

/// Split settled outcomes into successes and failures, keeping their order
pub fn partition_outcomes<T>(
    outcomes: impl IntoIterator<Item = ProviderOutcome<T>>,
) -> (Vec<ProviderSuccess<T>>, Vec<ProviderFailure>) {
    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            ProviderOutcome::Success(s) => successes.push(s),
            ProviderOutcome::Failure(f) => failures.push(f),
        }
    }
    (successes, failures)
}
