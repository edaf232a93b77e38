//! Raw provider response

use serde::{Deserialize, Serialize};

/// Unvalidated provider output plus usage metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub text: String,
    /// Model identifier reported by the provider (may differ from the one requested)
    pub model_identifier: String,
    pub input_units: u32,
    pub output_units: u32,
}

impl RawResponse {
    pub fn new(text: impl Into<String>, model_identifier: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_identifier: model_identifier.into(),
            input_units: 0,
            output_units: 0,
        }
    }

    pub fn with_usage(mut self, input_units: u32, output_units: u32) -> Self {
        self.input_units = input_units;
        self.output_units = output_units;
        self
    }
}
