//! Generic OpenAI-compatible chat adapter (Perplexity, Mistral, local
//! servers, ...).
//!
//! Simpler message contract: a single user message. System instructions
//! are prepended to the prompt because not every compatible server
//! honours a system role.

use super::common::{
    ChatCompletionResponse, ChatMessage, build_http_client, ensure_success, map_reqwest_error,
};
use crate::config::FileCompatibleConfig;
use async_trait::async_trait;
use brandlens_application::{ProviderAdapter, ProviderTransportError};
use brandlens_domain::{ProviderId, QueryRequest, RawResponse};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

pub struct CompatibleAdapter {
    id: ProviderId,
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl CompatibleAdapter {
    pub fn new(
        config: &FileCompatibleConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderTransportError> {
        let id = config.provider_id.trim();
        if id.is_empty() {
            return Err(ProviderTransportError::Configuration(
                "provider_id cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: ProviderId::from(id),
            client: build_http_client(config.timeout_seconds)?,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn to_api_request(&self, request: &QueryRequest) -> ChatRequest {
        let content = match &request.system_instructions {
            Some(system) => format!("{}\n\n{}", system, request.prompt_text),
            None => request.prompt_text.clone(),
        };

        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(content)],
            max_tokens: self.max_tokens,
            temperature: request.options.temperature,
        }
    }
}

#[async_trait]
impl ProviderAdapter for CompatibleAdapter {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    async fn query(&self, request: &QueryRequest) -> Result<RawResponse, ProviderTransportError> {
        debug!(provider = %self.id, model = %self.model, "Sending chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.to_api_request(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let api_response: ChatCompletionResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderTransportError::InvalidResponse(e.to_string()))?;

        api_response.into_raw()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}
