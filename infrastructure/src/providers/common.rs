//! Common utilities shared across provider adapters.

use brandlens_application::ProviderTransportError;
use brandlens_domain::{RawResponse, excerpt};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest error body kept in a transport error
const MAX_ERROR_BODY: usize = 500;

/// Build an HTTP client with the adapter's request timeout.
///
/// One client per adapter, constructed at assembly time.
pub fn build_http_client(timeout_secs: u64) -> Result<Client, ProviderTransportError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| {
            ProviderTransportError::Configuration(format!("failed to create HTTP client: {e}"))
        })
}

/// Map a reqwest failure to a transport error.
pub fn map_reqwest_error(error: reqwest::Error) -> ProviderTransportError {
    if error.is_timeout() {
        ProviderTransportError::Timeout
    } else if error.is_decode() {
        ProviderTransportError::InvalidResponse(error.to_string())
    } else {
        ProviderTransportError::Network(error.to_string())
    }
}

/// Turn a non-2xx response into `ProviderTransportError::Http`.
pub async fn ensure_success(response: Response) -> Result<Response, ProviderTransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ProviderTransportError::Http {
        status: status.as_u16(),
        body: excerpt(&body, MAX_ERROR_BODY),
    })
}

/// Chat message for OpenAI-compatible APIs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response shared by OpenAI and compatible APIs.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    /// Null when the model refused or only called tools
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Text of the first choice with usage attached.
    pub fn into_raw(self) -> Result<RawResponse, ProviderTransportError> {
        let text = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderTransportError::InvalidResponse("no message content in response".into())
            })?;

        let raw = RawResponse::new(text, self.model);
        Ok(match self.usage {
            Some(usage) => raw.with_usage(usage.prompt_tokens, usage.completion_tokens),
            None => raw,
        })
    }
}
