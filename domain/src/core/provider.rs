//! Provider identifier value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifies one external text-generation provider taking part in a scan.
///
/// The string form is what gets persisted as the key of the per-provider
/// result map, so it must stay stable across releases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderId {
    Anthropic,
    OpenAi,
    Perplexity,
    Custom(String),
}

impl ProviderId {
    /// Get the persisted identifier for this provider
    pub fn as_str(&self) -> &str {
        match self {
            ProviderId::Anthropic => "anthropic",
            ProviderId::OpenAi => "openai",
            ProviderId::Perplexity => "perplexity",
            ProviderId::Custom(s) => s,
        }
    }

    /// Human-readable name for console output
    pub fn display_name(&self) -> &str {
        match self {
            ProviderId::Anthropic => "Anthropic",
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Perplexity => "Perplexity",
            ProviderId::Custom(s) => s,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => ProviderId::Anthropic,
            "openai" | "chatgpt" => ProviderId::OpenAi,
            "perplexity" => ProviderId::Perplexity,
            _ => ProviderId::Custom(s.trim().to_string()),
        })
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

impl Serialize for ProviderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ProviderId::from(s.as_str()))
    }
}
