//! Anthropic Messages API adapter.
//!
//! Fixed request/response shape: one user message, optional system prompt,
//! no tool use.

use super::common::{build_http_client, ensure_success, map_reqwest_error};
use crate::config::FileAnthropicConfig;
use async_trait::async_trait;
use brandlens_application::{ProviderAdapter, ProviderTransportError};
use brandlens_domain::{ProviderId, QueryRequest, RawResponse};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct AnthropicAdapter {
    id: ProviderId,
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    api_version: String,
}

impl AnthropicAdapter {
    pub fn new(
        config: &FileAnthropicConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderTransportError> {
        Ok(Self {
            id: ProviderId::Anthropic,
            client: build_http_client(config.timeout_seconds)?,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_version: config.api_version.clone(),
        })
    }

    fn to_api_request(&self, request: &QueryRequest) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: request.system_instructions.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: request.prompt_text.clone(),
            }],
            temperature: request.options.temperature,
        }
    }

    fn convert_api_response(response: MessagesResponse) -> Result<RawResponse, ProviderTransportError> {
        let text: String = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(ProviderTransportError::InvalidResponse(
                "no text content in response".to_string(),
            ));
        }

        let raw = RawResponse::new(text, response.model);
        Ok(match response.usage {
            Some(usage) => raw.with_usage(usage.input_tokens, usage.output_tokens),
            None => raw,
        })
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    async fn query(&self, request: &QueryRequest) -> Result<RawResponse, ProviderTransportError> {
        debug!(model = %self.model, "Sending Anthropic messages request");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&self.to_api_request(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let api_response: MessagesResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderTransportError::InvalidResponse(e.to_string()))?;

        Self::convert_api_response(api_response)
    }
}

// Anthropic API types

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    model: String,
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}
