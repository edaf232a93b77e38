//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod fan_out;
pub mod generate_prompts;
pub mod retry_coordinator;
pub mod run_sentiment_scan;
pub mod run_visibility_scan;
pub(crate) mod shared;
