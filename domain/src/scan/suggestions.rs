//! Onboarding prompt suggestions.
//!
//! When a project is created, providers are asked which questions a real
//! user would type that should surface the brand. Suggestions from every
//! successful provider are merged into one list.

use super::payload::MAX_LIST_ITEMS;
use crate::extraction::schema::{ResultSchema, check_len};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Schema-validated suggestion list from one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSuggestions {
    pub prompts: Vec<String>,
}

impl PromptSuggestions {
    /// Merge lists in order, dropping case-insensitive duplicates, capped at 10
    pub fn merge<'a>(lists: impl IntoIterator<Item = &'a PromptSuggestions>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut merged = Vec::new();

        for prompt in lists.into_iter().flat_map(|l| l.prompts.iter()) {
            if merged.len() == MAX_LIST_ITEMS {
                break;
            }
            if seen.insert(prompt.trim().to_lowercase()) {
                merged.push(prompt.trim().to_string());
            }
        }

        merged
    }
}

#[derive(Deserialize)]
struct RawSuggestions {
    prompts: Vec<String>,
}

/// Schema for onboarding prompt generation.
///
/// Providers sometimes answer with a bare array instead of the wrapping
/// object; both are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptSuggestionsSchema;

impl ResultSchema for PromptSuggestionsSchema {
    type Output = PromptSuggestions;

    fn name(&self) -> &'static str {
        "prompt_suggestions"
    }

    fn json_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "additionalProperties": false,
            "required": ["prompts"],
            "properties": {
                "prompts": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 1,
                    "maxItems": MAX_LIST_ITEMS,
                },
            },
        })
    }

    fn validate(&self, value: serde_json::Value) -> Result<PromptSuggestions, String> {
        let prompts = if value.is_array() {
            serde_json::from_value::<Vec<String>>(value).map_err(|e| e.to_string())?
        } else {
            serde_json::from_value::<RawSuggestions>(value)
                .map_err(|e| e.to_string())?
                .prompts
        };

        check_len("prompts", prompts.len(), 1, MAX_LIST_ITEMS)?;
        if prompts.iter().any(|p| p.trim().is_empty()) {
            return Err("`prompts` must not contain blank entries".to_string());
        }

        Ok(PromptSuggestions { prompts })
    }
}
