//! Sentiment payload, the structured result of one provider in a brand scan.
//!
//! Wire/persisted shape (field names are compact on purpose):
//!
//! ```text
//! {
//!   "s":  0..=100,                     score
//!   "t":  [1..=10] string | {name, sentiment, weight}
//!   "kp": [1..=10] string,             positive keywords
//!   "kn": [1..=10] string              negative keywords
//! }
//! ```
//!
//! A failed provider is persisted as the zero-value placeholder
//! `{"s": 0, "t": [], "kp": [], "kn": []}`.

use crate::extraction::schema::{ResultSchema, check_len, check_range};
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u8 = 100;
pub const MAX_LIST_ITEMS: usize = 10;

/// Polarity of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSentiment {
    Positive,
    Negative,
    Neutral,
}

impl ThemeSentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeSentiment::Positive => "positive",
            ThemeSentiment::Negative => "negative",
            ThemeSentiment::Neutral => "neutral",
        }
    }
}

impl std::str::FromStr for ThemeSentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            other => Err(format!(
                "sentiment must be positive, negative or neutral, got `{}`",
                other
            )),
        }
    }
}

/// Rich theme encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDetail {
    pub name: String,
    pub sentiment: ThemeSentiment,
    pub weight: u8,
}

/// One theme: either a bare label or a name/sentiment/weight triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Theme {
    Detailed(ThemeDetail),
    Label(String),
}

impl Theme {
    pub fn name(&self) -> &str {
        match self {
            Theme::Detailed(detail) => &detail.name,
            Theme::Label(label) => label,
        }
    }
}

/// Schema-validated sentiment payload
///
/// Values built through [`SentimentSchema`] always have a score within
/// `0..=100` and 1..=10 items in every list. The only other constructor is
/// [`StructuredResult::placeholder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredResult {
    #[serde(rename = "s")]
    pub score: u8,
    #[serde(rename = "t")]
    pub themes: Vec<Theme>,
    #[serde(rename = "kp")]
    pub positive_keywords: Vec<String>,
    #[serde(rename = "kn")]
    pub negative_keywords: Vec<String>,
}

impl StructuredResult {
    /// Zero-value stand-in for a failed provider; never aggregated
    pub fn placeholder() -> Self {
        Self {
            score: 0,
            themes: Vec::new(),
            positive_keywords: Vec::new(),
            negative_keywords: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

// ==================== Schema ====================

/// Incoming payload before range checks. Long field names are accepted as
/// aliases because some providers expand the compact keys.
#[derive(Deserialize)]
struct RawSentiment {
    #[serde(alias = "score")]
    s: i64,
    #[serde(alias = "themes")]
    t: Vec<RawTheme>,
    #[serde(alias = "positive_keywords", alias = "positiveKeywords")]
    kp: Vec<String>,
    #[serde(alias = "negative_keywords", alias = "negativeKeywords")]
    kn: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTheme {
    Detailed {
        name: String,
        sentiment: String,
        weight: i64,
    },
    Label(String),
}

/// Schema for the brand-sentiment scan
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentSchema;

impl SentimentSchema {
    fn validate_theme(raw: RawTheme) -> Result<Theme, String> {
        match raw {
            RawTheme::Detailed {
                name,
                sentiment,
                weight,
            } => Self::detailed(name, &sentiment, weight),
            RawTheme::Label(label) => match Self::split_compact(&label) {
                Some((name, sentiment, weight)) => {
                    let weight = weight
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| format!("theme weight `{}` is not an integer", weight))?;
                    Self::detailed(name.to_string(), sentiment, weight)
                }
                None => Ok(Theme::Label(label)),
            },
        }
    }

    fn detailed(name: String, sentiment: &str, weight: i64) -> Result<Theme, String> {
        let sentiment = sentiment.parse::<ThemeSentiment>()?;
        check_range("weight", weight, 0, i64::from(MAX_SCORE))?;
        Ok(Theme::Detailed(ThemeDetail {
            name: name.trim().to_string(),
            sentiment,
            weight: weight as u8,
        }))
    }

    /// Compact theme encoding: `"name|sentiment|weight"`
    fn split_compact(label: &str) -> Option<(&str, &str, &str)> {
        let mut parts = label.split('|');
        let name = parts.next()?;
        let sentiment = parts.next()?;
        let weight = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some((name, sentiment, weight))
    }
}

impl ResultSchema for SentimentSchema {
    type Output = StructuredResult;

    fn name(&self) -> &'static str {
        "brand_sentiment"
    }

    fn json_schema(&self) -> serde_json::Value {
        let keywords = serde_json::json!({
            "type": "array",
            "items": {"type": "string"},
            "minItems": 1,
            "maxItems": MAX_LIST_ITEMS,
        });
        serde_json::json!({
            "type": "object",
            "additionalProperties": false,
            "required": ["s", "t", "kp", "kn"],
            "properties": {
                "s": {"type": "integer", "minimum": 0, "maximum": MAX_SCORE},
                "t": {
                    "type": "array",
                    "minItems": 1,
                    "maxItems": MAX_LIST_ITEMS,
                    "items": {
                        "anyOf": [
                            {"type": "string"},
                            {
                                "type": "object",
                                "additionalProperties": false,
                                "required": ["name", "sentiment", "weight"],
                                "properties": {
                                    "name": {"type": "string"},
                                    "sentiment": {"enum": ["positive", "negative", "neutral"]},
                                    "weight": {"type": "integer", "minimum": 0, "maximum": MAX_SCORE},
                                },
                            },
                        ],
                    },
                },
                "kp": keywords,
                "kn": keywords,
            },
        })
    }

    fn validate(&self, value: serde_json::Value) -> Result<StructuredResult, String> {
        let raw: RawSentiment = serde_json::from_value(value).map_err(|e| e.to_string())?;

        check_range("s", raw.s, 0, i64::from(MAX_SCORE))?;
        check_len("t", raw.t.len(), 1, MAX_LIST_ITEMS)?;
        check_len("kp", raw.kp.len(), 1, MAX_LIST_ITEMS)?;
        check_len("kn", raw.kn.len(), 1, MAX_LIST_ITEMS)?;

        let themes = raw
            .t
            .into_iter()
            .map(Self::validate_theme)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StructuredResult {
            score: raw.s as u8,
            themes,
            positive_keywords: raw.kp,
            negative_keywords: raw.kn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{ExtractionError, extract};
    use serde_json::json;

    fn valid_payload(score: i64) -> serde_json::Value {
        json!({
            "s": score,
            "t": ["pricing", {"name": "support", "sentiment": "positive", "weight": 70}],
            "kp": ["reliable"],
            "kn": ["expensive"],
        })
    }

    #[test]
    fn test_valid_payload() {
        let result = SentimentSchema.validate(valid_payload(75)).unwrap();
        assert_eq!(result.score, 75);
        assert_eq!(result.themes[0], Theme::Label("pricing".to_string()));
        assert_eq!(
            result.themes[1],
            Theme::Detailed(ThemeDetail {
                name: "support".to_string(),
                sentiment: ThemeSentiment::Positive,
                weight: 70,
            })
        );
    }

    #[test]
    fn test_score_out_of_range() {
        let err = SentimentSchema.validate(valid_payload(150)).unwrap_err();
        assert!(err.contains("`s`"));
        assert!(SentimentSchema.validate(valid_payload(-3)).is_err());
    }

    #[test]
    fn test_fractional_score_rejected() {
        assert!(SentimentSchema.validate(valid_payload(0)).is_ok());
        let payload = json!({"s": 72.5, "t": ["a"], "kp": ["b"], "kn": ["c"]});
        assert!(SentimentSchema.validate(payload).is_err());
    }

    #[test]
    fn test_missing_field() {
        let payload = json!({"s": 50, "t": ["a"], "kp": ["b"]});
        assert!(SentimentSchema.validate(payload).is_err());
    }

    #[test]
    fn test_empty_and_oversized_lists() {
        let empty = json!({"s": 50, "t": [], "kp": ["b"], "kn": ["c"]});
        assert!(SentimentSchema.validate(empty).is_err());

        let eleven: Vec<String> = (0..11).map(|i| format!("k{}", i)).collect();
        let oversized = json!({"s": 50, "t": ["a"], "kp": eleven, "kn": ["c"]});
        let err = SentimentSchema.validate(oversized).unwrap_err();
        assert_eq!(err, "`kp` must contain 1..=10 items, got 11");
    }

    #[test]
    fn test_unknown_theme_sentiment() {
        let payload = json!({
            "s": 50,
            "t": [{"name": "x", "sentiment": "mixed", "weight": 10}],
            "kp": ["b"],
            "kn": ["c"],
        });
        assert!(SentimentSchema.validate(payload).is_err());
    }

    #[test]
    fn test_compact_theme_expansion() {
        let payload = json!({
            "s": 40,
            "t": ["delivery times|Negative|85", "brand name"],
            "kp": ["b"],
            "kn": ["c"],
        });
        let result = SentimentSchema.validate(payload).unwrap();
        assert_eq!(
            result.themes[0],
            Theme::Detailed(ThemeDetail {
                name: "delivery times".to_string(),
                sentiment: ThemeSentiment::Negative,
                weight: 85,
            })
        );
        assert_eq!(result.themes[1].name(), "brand name");
    }

    #[test]
    fn test_long_field_aliases() {
        let payload = json!({
            "score": 60,
            "themes": ["a"],
            "positiveKeywords": ["b"],
            "negativeKeywords": ["c"],
        });
        assert_eq!(SentimentSchema.validate(payload).unwrap().score, 60);
    }

    #[test]
    fn test_extract_fenced_sentiment() {
        let raw = "```json\n{\"s\": 85, \"t\": [\"quality\"], \"kp\": [\"durable\"], \"kn\": [\"slow\"]}\n```";
        let result = extract(raw, &SentimentSchema).unwrap();
        assert_eq!(result.score, 85);
    }

    #[test]
    fn test_extract_rejects_out_of_range() {
        let raw = r#"{"s": 150, "t": ["a"], "kp": ["b"], "kn": ["c"]}"#;
        assert!(matches!(
            extract(raw, &SentimentSchema),
            Err(ExtractionError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_placeholder_shape() {
        let placeholder = StructuredResult::placeholder();
        assert!(placeholder.is_placeholder());
        assert_eq!(
            serde_json::to_value(&placeholder).unwrap(),
            json!({"s": 0, "t": [], "kp": [], "kn": []})
        );
    }

    #[test]
    fn test_serialized_detailed_theme() {
        let result = SentimentSchema.validate(valid_payload(10)).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value["t"][1],
            json!({"name": "support", "sentiment": "positive", "weight": 70})
        );
    }
}
