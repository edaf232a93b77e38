//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Pick the inline key when set, otherwise look up the named variable.
fn resolve_key(
    inline: Option<&str>,
    env_name: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    inline
        .map(str::to_string)
        .or_else(|| lookup(env_name))
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Anthropic Messages API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    pub enabled: bool,
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
    pub timeout_seconds: u64,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-sonnet-4-5".to_string(),
            max_tokens: 1024,
            api_version: "2023-06-01".to_string(),
            timeout_seconds: 60,
        }
    }
}

impl FileAnthropicConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(env_lookup)
    }

    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env, lookup)
    }
}

/// OpenAI Chat Completions provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    pub enabled: bool,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    pub api_key: Option<String>,
    /// Base URL (can be overridden for Azure OpenAI or a proxy).
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    /// Let the model search the web before answering (search-capable models only)
    pub web_search: bool,
    /// Ask the API to emit exactly the target JSON schema
    pub enforce_schema: bool,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            max_tokens: 1024,
            timeout_seconds: 60,
            web_search: false,
            enforce_schema: true,
        }
    }
}

impl FileOpenAiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(env_lookup)
    }

    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env, lookup)
    }
}

/// Any OpenAI-compatible chat endpoint (Perplexity by default).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompatibleConfig {
    pub enabled: bool,
    /// Identifier reported in scan results (e.g. "perplexity", "mistral")
    pub provider_id: String,
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for FileCompatibleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider_id: "perplexity".to_string(),
            api_key_env: "PERPLEXITY_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.perplexity.ai".to_string(),
            model: "sonar".to_string(),
            max_tokens: 1024,
            timeout_seconds: 60,
        }
    }
}

impl FileCompatibleConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(env_lookup)
    }

    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env, lookup)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub anthropic: FileAnthropicConfig,
    pub openai: FileOpenAiConfig,
    pub compatible: FileCompatibleConfig,
}
