//! OpenAI Chat Completions adapter.
//!
//! Two adapter-local switches: `web_search` adds `web_search_options` so a
//! search-capable model grounds its answer, and `enforce_schema` forwards
//! the request's JSON schema as a strict `response_format`. The returned
//! text is still validated by the extractor either way.

use super::common::{
    ChatCompletionResponse, ChatMessage, build_http_client, ensure_success, map_reqwest_error,
};
use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use brandlens_application::{ProviderAdapter, ProviderTransportError};
use brandlens_domain::{ProviderId, QueryRequest, RawResponse};
use reqwest::Client;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

pub struct OpenAiAdapter {
    id: ProviderId,
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    web_search: bool,
    enforce_schema: bool,
}

impl OpenAiAdapter {
    pub fn new(
        config: &FileOpenAiConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderTransportError> {
        Ok(Self {
            id: ProviderId::OpenAi,
            client: build_http_client(config.timeout_seconds)?,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            web_search: config.web_search,
            enforce_schema: config.enforce_schema,
        })
    }

    fn to_api_request(&self, request: &QueryRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system_instructions {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(request.prompt_text.clone()));

        let response_format = request
            .options
            .response_format
            .as_ref()
            .filter(|_| self.enforce_schema)
            .map(|format| {
                json!({
                    "type": "json_schema",
                    "json_schema": {
                        "name": format.name,
                        "schema": format.schema,
                        "strict": true,
                    }
                })
            });

        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            // Search models reject sampling parameters
            temperature: request.options.temperature.filter(|_| !self.web_search),
            web_search_options: self.web_search.then(|| json!({})),
            response_format,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    async fn query(&self, request: &QueryRequest) -> Result<RawResponse, ProviderTransportError> {
        debug!(
            model = %self.model,
            web_search = self.web_search,
            enforce_schema = self.enforce_schema,
            "Sending OpenAI chat completion"
        );

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
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
    #[serde(skip_serializing_if = "Option::is_none")]
    web_search_options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}
