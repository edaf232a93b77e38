//! Query request sent to every provider in a run

use serde::{Deserialize, Serialize};

/// Target schema handed to providers that can enforce structured output.
///
/// Adapters without schema enforcement ignore it; the extractor validates
/// the text either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Schema name (`[a-z_]+`, sent verbatim to providers)
    pub name: String,
    /// JSON Schema document
    pub schema: serde_json::Value,
}

/// Provider-neutral generation options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Immutable query built once per orchestration run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub prompt_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instructions: Option<String>,
    #[serde(default)]
    pub options: QueryOptions,
}

impl QueryRequest {
    pub fn new(prompt_text: impl Into<String>) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            system_instructions: None,
            options: QueryOptions::default(),
        }
    }

    pub fn with_system_instructions(mut self, system: impl Into<String>) -> Self {
        self.system_instructions = Some(system.into());
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.options.response_format = Some(format);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }
}
