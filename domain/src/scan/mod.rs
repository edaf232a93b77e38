//! Brand scan domain
//!
//! Payload schemas, per-provider outcomes, the retry policy and the
//! aggregation rules shared by the sentiment, visibility and onboarding
//! pipelines.
//!
//! ```text
//! QueryRequest ──▶ N × (ProviderAdapter + extract) ──▶ ProviderOutcome
//!                                                        │
//!                               successes ◀──partition───┘───▶ failures
//!                                   │                            │
//!                                   └──── AggregateResult ◀──────┘
//!                                          (placeholder per failure,
//!                                           score from successes only)
//! ```

pub mod aggregate;
pub mod outcome;
pub mod payload;
pub mod retry;
pub mod suggestions;
pub mod visibility;

pub use aggregate::{AggregateResult, VisibilityReport, aggregate_score, mention_rate};
pub use outcome::{ProviderFailure, ProviderOutcome, ProviderSuccess, partition_outcomes};
pub use payload::{SentimentSchema, StructuredResult, Theme, ThemeDetail, ThemeSentiment};
pub use retry::{AttemptState, RetryPolicy};
pub use suggestions::{PromptSuggestions, PromptSuggestionsSchema};
pub use visibility::{VisibilityResult, VisibilitySchema};
