//! Domain layer for brandlens
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Scan
//!
//! A scan sends one semantically equivalent query to several independent
//! providers, recovers a structured payload from each free-form answer, and
//! reduces the successful payloads to a single result:
//!
//! - **Extraction**: fixed heuristic that finds the JSON in provider text
//!   and validates it against a [`ResultSchema`]
//! - **Aggregation**: mean of successful scores, rounded half-up; failed
//!   providers are represented by a zero-value placeholder
//! - **Retry policy**: bounded attempts with a flat delay per provider

pub mod brand;
pub mod core;
pub mod extraction;
pub mod prompt;
pub mod query;
pub mod scan;

// Re-export commonly used types
pub use brand::{Project, ProjectId, UserId};
pub use core::{error::DomainError, provider::ProviderId, string::excerpt};
pub use extraction::{ExtractionError, ResultSchema, extract, locate_json_candidate};
pub use prompt::PromptBuilder;
pub use query::{QueryOptions, QueryRequest, RawResponse, ResponseFormat};
pub use scan::{
    AggregateResult, AttemptState, PromptSuggestions, PromptSuggestionsSchema, ProviderFailure,
    ProviderOutcome, ProviderSuccess, RetryPolicy, SentimentSchema, StructuredResult, Theme,
    ThemeDetail, ThemeSentiment, VisibilityReport, VisibilityResult, VisibilitySchema,
    aggregate_score, mention_rate, partition_outcomes,
};
