//! Visibility payload: does a provider mention the brand unprompted?

use super::payload::MAX_LIST_ITEMS;
use crate::extraction::schema::{ResultSchema, check_len, check_range};
use serde::{Deserialize, Serialize};

/// Schema-validated visibility answer from one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityResult {
    pub mentioned: bool,
    /// Rank at which the brand appeared in the provider's answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u8>,
    pub competitors: Vec<String>,
}

#[derive(Deserialize)]
struct RawVisibility {
    mentioned: bool,
    #[serde(default)]
    position: Option<i64>,
    #[serde(default)]
    competitors: Vec<String>,
}

/// Schema for the visibility scan
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilitySchema;

impl ResultSchema for VisibilitySchema {
    type Output = VisibilityResult;

    fn name(&self) -> &'static str {
        "brand_visibility"
    }

    fn json_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "additionalProperties": false,
            "required": ["mentioned", "position", "competitors"],
            "properties": {
                "mentioned": {"type": "boolean"},
                "position": {"type": ["integer", "null"], "minimum": 1, "maximum": 100},
                "competitors": {
                    "type": "array",
                    "items": {"type": "string"},
                    "maxItems": MAX_LIST_ITEMS,
                },
            },
        })
    }

    fn validate(&self, value: serde_json::Value) -> Result<VisibilityResult, String> {
        let raw: RawVisibility = serde_json::from_value(value).map_err(|e| e.to_string())?;

        check_len("competitors", raw.competitors.len(), 0, MAX_LIST_ITEMS)?;
        let position = match raw.position {
            Some(p) => {
                check_range("position", p, 1, 100)?;
                Some(p as u8)
            }
            None => None,
        };
        if position.is_some() && !raw.mentioned {
            return Err("`position` given for a brand that was not mentioned".to_string());
        }

        Ok(VisibilityResult {
            mentioned: raw.mentioned,
            position,
            competitors: raw.competitors,
        })
    }
}
