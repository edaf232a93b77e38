//! Prompt construction for provider queries.

pub mod template;

pub use template::PromptBuilder;
