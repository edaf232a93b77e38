//! Reduction of successful provider payloads to one scan result.

use super::outcome::{ProviderFailure, ProviderSuccess};
use super::payload::StructuredResult;
use super::visibility::VisibilityResult;
use crate::core::error::DomainError;
use crate::core::provider::ProviderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arithmetic mean rounded half-up.
///
/// # Panics
/// Panics when `values` is empty. Callers only aggregate after checking
/// that at least one provider succeeded.
fn mean_round_half_up(values: impl IntoIterator<Item = u64>) -> u64 {
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), v| (sum + v, count + 1));
    assert!(count > 0, "cannot aggregate zero successful providers");
    // floor(sum / count + 1/2) without floating point
    (2 * sum + count) / (2 * count)
}

/// Overall score: mean of successful scores, rounded half-up.
///
/// # Panics
/// Panics when `scores` is empty.
pub fn aggregate_score(scores: impl IntoIterator<Item = u8>) -> u8 {
    // The mean of values within 0..=100 stays within 0..=100
    mean_round_half_up(scores.into_iter().map(u64::from)) as u8
}

/// Percentage of successful providers that mentioned the brand, rounded half-up.
///
/// # Panics
/// Panics when `results` is empty.
pub fn mention_rate<'a>(results: impl IntoIterator<Item = &'a VisibilityResult>) -> u8 {
    mean_round_half_up(
        results
            .into_iter()
            .map(|r| if r.mentioned { 100 } else { 0 }),
    ) as u8
}

/// Aggregate of one sentiment scan.
///
/// Only constructible when at least one provider succeeded. Failed
/// providers appear in `per_provider_results` as the zero-value
/// placeholder so consumers always see one entry per configured provider,
/// but they never count towards `overall_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub scanned_at: DateTime<Utc>,
    pub overall_score: u8,
    pub per_provider_results: BTreeMap<ProviderId, StructuredResult>,
    pub failures: Vec<ProviderFailure>,
}

impl AggregateResult {
    /// Build the aggregate, or report total failure when nothing succeeded.
    pub fn build(
        scanned_at: DateTime<Utc>,
        successes: &[ProviderSuccess<StructuredResult>],
        failures: Vec<ProviderFailure>,
    ) -> Result<Self, DomainError> {
        if successes.is_empty() {
            return Err(DomainError::TotalProviderFailure(failures));
        }

        let overall_score = aggregate_score(successes.iter().map(|s| s.payload.score));

        let mut per_provider_results: BTreeMap<ProviderId, StructuredResult> = successes
            .iter()
            .map(|s| (s.provider_id.clone(), s.payload.clone()))
            .collect();
        for failure in &failures {
            per_provider_results
                .entry(failure.provider_id.clone())
                .or_insert_with(StructuredResult::placeholder);
        }

        Ok(Self {
            scanned_at,
            overall_score,
            per_provider_results,
            failures,
        })
    }

    /// Partial success: some but not all providers failed
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Aggregate of one visibility scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityReport {
    pub scanned_at: DateTime<Utc>,
    pub mention_rate: u8,
    /// `None` for providers that failed
    pub per_provider_results: BTreeMap<ProviderId, Option<VisibilityResult>>,
    pub failures: Vec<ProviderFailure>,
}

impl VisibilityReport {
    pub fn build(
        scanned_at: DateTime<Utc>,
        successes: &[ProviderSuccess<VisibilityResult>],
        failures: Vec<ProviderFailure>,
    ) -> Result<Self, DomainError> {
        if successes.is_empty() {
            return Err(DomainError::TotalProviderFailure(failures));
        }

        let mention_rate = mention_rate(successes.iter().map(|s| &s.payload));
        let mut per_provider_results: BTreeMap<_, _> = successes
            .iter()
            .map(|s| (s.provider_id.clone(), Some(s.payload.clone())))
            .collect();
        for failure in &failures {
            per_provider_results
                .entry(failure.provider_id.clone())
                .or_insert(None);
        }

        Ok(Self {
            scanned_at,
            mention_rate,
            per_provider_results,
            failures,
        })
    }
}
