//! Structured-output extraction from free-form provider text.
//!
//! Providers are asked for JSON but routinely wrap it in markdown fences,
//! prefix it with prose, or return something else entirely. Extraction is a
//! fixed, deliberately simple heuristic:
//!
//! 1. Trim; strip an opening code fence (with or without a language tag)
//!    and a trailing fence.
//! 2. Start at whichever of `{` / `[` appears first; no bracket at all is
//!    [`ExtractionError::NoJsonFound`].
//! 3. Parse from there to the end of the text ([`ExtractionError::InvalidJson`]).
//! 4. Validate against the target [`ResultSchema`]
//!    ([`ExtractionError::SchemaViolation`]).
//!
//! The scanner does not balance brackets. Prose before the payload that
//! contains a stray `{` or `[` makes extraction fail, and so does trailing
//! prose after it. Historical payloads were produced under exactly this
//! rule, so it is kept as is.

pub mod error;
pub mod schema;

pub use error::ExtractionError;
pub use schema::ResultSchema;

const FENCE: &str = "```";

/// Remove a leading and a trailing markdown code fence, if present.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        // Language tag (`json`, `JSON`, `javascript`...) sits right after the fence
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
        text = rest.trim_start();
    }

    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest.trim_end();
    }

    text
}

/// Locate the JSON candidate: from the first `{` or `[` to the end of the text.
pub fn locate_json_candidate(raw: &str) -> Result<&str, ExtractionError> {
    let text = strip_code_fences(raw);

    let start = match (text.find('{'), text.find('[')) {
        (Some(brace), Some(bracket)) => brace.min(bracket),
        (Some(brace), None) => brace,
        (None, Some(bracket)) => bracket,
        (None, None) => return Err(ExtractionError::NoJsonFound),
    };

    Ok(&text[start..])
}

/// Recover and validate a structured payload from raw provider text.
pub fn extract<S: ResultSchema + ?Sized>(
    raw: &str,
    schema: &S,
) -> Result<S::Output, ExtractionError> {
    let candidate = locate_json_candidate(raw)?;

    let value: serde_json::Value = serde_json::from_str(candidate)
        .map_err(|e| ExtractionError::InvalidJson(e.to_string()))?;

    schema
        .validate(value)
        .map_err(ExtractionError::SchemaViolation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    /// Accepts any JSON value verbatim
    struct AnyJson;

    impl ResultSchema for AnyJson {
        type Output = Value;

        fn name(&self) -> &'static str {
            "any_json"
        }

        fn json_schema(&self) -> Value {
            json!({})
        }

        fn validate(&self, value: Value) -> Result<Value, String> {
            Ok(value)
        }
    }

    /// Requires `{"n": <0..=10>}`
    struct SmallNumber;

    impl ResultSchema for SmallNumber {
        type Output = i64;

        fn name(&self) -> &'static str {
            "small_number"
        }

        fn json_schema(&self) -> Value {
            json!({"type": "object"})
        }

        fn validate(&self, value: Value) -> Result<i64, String> {
            let n = value
                .get("n")
                .and_then(Value::as_i64)
                .ok_or_else(|| "missing `n`".to_string())?;
            schema::check_range("n", n, 0, 10)?;
            Ok(n)
        }
    }

    // ==================== Fence stripping ====================

    #[test]
    fn test_bare_object() {
        let value = extract(r#"{"a": 1}"#, &AnyJson).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_fenced_with_language_tag() {
        let raw = "```json\n{\"a\": [1, 2]}\n```";
        assert_eq!(extract(raw, &AnyJson).unwrap(), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_fenced_without_language_tag() {
        let raw = "```\n[1, 2, 3]\n```";
        assert_eq!(extract(raw, &AnyJson).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_surrounding_whitespace() {
        let raw = "\n\n   ```json\n  {\"a\": true}  \n```   \n";
        assert_eq!(extract(raw, &AnyJson).unwrap(), json!({"a": true}));
    }

    #[test]
    fn test_prose_before_payload() {
        let raw = "Here is the analysis you asked for:\n{\"a\": 1}";
        assert_eq!(extract(raw, &AnyJson).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_fence_after_prose() {
        let raw = "Result:\n```json\n{\"a\": 1}\n```";
        assert_eq!(extract(raw, &AnyJson).unwrap(), json!({"a": 1}));
    }

    // ==================== Bracket precedence ====================

    #[test]
    fn test_first_bracket_wins_array() {
        let candidate = locate_json_candidate(r#"[{"a": 1}]"#).unwrap();
        assert!(candidate.starts_with('['));
    }

    #[test]
    fn test_first_bracket_wins_object() {
        let candidate = locate_json_candidate(r#"{"list": [1]}"#).unwrap();
        assert!(candidate.starts_with('{'));
    }

    #[test]
    fn test_stray_bracket_in_prose_is_taken() {
        // Known limitation: the stray `[` wins and parsing fails.
        let raw = "Scores [see below]: {\"a\": 1}";
        assert!(matches!(
            extract(raw, &AnyJson),
            Err(ExtractionError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_trailing_prose_is_invalid() {
        let raw = "{\"a\": 1}\nLet me know if you need more.";
        assert!(matches!(
            extract(raw, &AnyJson),
            Err(ExtractionError::InvalidJson(_))
        ));
    }

    // ==================== Failure classes ====================

    #[test]
    fn test_no_json_found() {
        assert_eq!(
            extract("I'm sorry, I can't help with that.", &AnyJson),
            Err(ExtractionError::NoJsonFound)
        );
        assert_eq!(extract("", &AnyJson), Err(ExtractionError::NoJsonFound));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            extract("{\"a\": 1,", &AnyJson),
            Err(ExtractionError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_schema_violation() {
        assert_eq!(extract("{\"n\": 7}", &SmallNumber), Ok(7));
        assert!(matches!(
            extract("{\"n\": 150}", &SmallNumber),
            Err(ExtractionError::SchemaViolation(_))
        ));
    }
}
