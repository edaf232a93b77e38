//! Provider adapters
//!
//! One [`ProviderAdapter`] implementation per provider API, each owning its
//! own HTTP client. [`assemble_providers`] builds the configured set.

pub mod anthropic;
pub mod common;
pub mod compatible;
pub mod openai;

pub use anthropic::AnthropicAdapter;
pub use compatible::CompatibleAdapter;
pub use openai::OpenAiAdapter;

use crate::config::FileProvidersConfig;
use brandlens_application::{ProviderAdapter, ProviderTransportError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Build every enabled provider whose API key resolves.
///
/// Order is stable (anthropic, openai, compatible); it determines the order
/// of per-provider results.
pub fn assemble_providers(config: &FileProvidersConfig) -> Vec<Arc<dyn ProviderAdapter>> {
    assemble_providers_with(config, |name| std::env::var(name).ok())
}

/// Same as [`assemble_providers`] with an explicit env lookup.
pub fn assemble_providers_with(
    config: &FileProvidersConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<Arc<dyn ProviderAdapter>> {
    let mut providers: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

    let anthropic = &config.anthropic;
    if anthropic.enabled {
        let key = anthropic.resolve_api_key_with(&lookup);
        if let Some(adapter) = try_new("anthropic", &anthropic.api_key_env, key, |key| {
            AnthropicAdapter::new(anthropic, key)
        }) {
            providers.push(Arc::new(adapter));
        }
    }

    let openai = &config.openai;
    if openai.enabled {
        let key = openai.resolve_api_key_with(&lookup);
        if let Some(adapter) = try_new("openai", &openai.api_key_env, key, |key| {
            OpenAiAdapter::new(openai, key)
        }) {
            providers.push(Arc::new(adapter));
        }
    }

    let compatible = &config.compatible;
    if compatible.enabled {
        let key = compatible.resolve_api_key_with(&lookup);
        if let Some(adapter) = try_new(&compatible.provider_id, &compatible.api_key_env, key, |key| {
            CompatibleAdapter::new(compatible, key)
        }) {
            if providers.iter().any(|p| p.id() == adapter.id()) {
                warn!(
                    "{} provider skipped: id {} is already in use",
                    compatible.provider_id,
                    adapter.id()
                );
            } else {
                providers.push(Arc::new(adapter));
            }
        }
    }

    info!("{} providers available", providers.len());
    providers
}

/// Construct one adapter, or log why it is unavailable.
fn try_new<A>(
    name: &str,
    key_env: &str,
    api_key: Option<String>,
    build: impl FnOnce(String) -> Result<A, ProviderTransportError>,
) -> Option<A> {
    let Some(api_key) = api_key else {
        warn!("{} provider not available: {} is not set", name, key_env);
        return None;
    };

    match build(api_key) {
        Ok(adapter) => {
            debug!("{} provider initialized", name);
            Some(adapter)
        }
        Err(e) => {
            warn!("{} provider not available: {}", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandlens_domain::ProviderId;

    fn ids(providers: &[Arc<dyn ProviderAdapter>]) -> Vec<ProviderId> {
        providers.iter().map(|p| p.id().clone()).collect()
    }

    #[test]
    fn test_only_providers_with_keys_are_assembled() {
        let config = FileProvidersConfig::default();
        let providers = assemble_providers_with(&config, |name| {
            (name == "OPENAI_API_KEY").then(|| "sk-test".to_string())
        });
        assert_eq!(ids(&providers), vec![ProviderId::OpenAi]);
    }

    #[test]
    fn test_disabled_providers_are_skipped() {
        let mut config = FileProvidersConfig::default();
        config.anthropic.enabled = false;
        config.compatible.enabled = true;

        let providers = assemble_providers_with(&config, |_| Some("sk-test".to_string()));
        assert_eq!(
            ids(&providers),
            vec![ProviderId::OpenAi, ProviderId::Perplexity]
        );
    }

    #[test]
    fn test_compatible_alias_of_assembled_provider_is_skipped() {
        let mut config = FileProvidersConfig::default();
        config.compatible.enabled = true;
        config.compatible.provider_id = "Claude".to_string();

        let providers = assemble_providers_with(&config, |_| Some("sk-test".to_string()));
        assert_eq!(
            ids(&providers),
            vec![ProviderId::Anthropic, ProviderId::OpenAi]
        );
    }

    #[test]
    fn test_no_keys_no_providers() {
        let providers = assemble_providers_with(&FileProvidersConfig::default(), |_| None);
        assert!(providers.is_empty());
    }
}
