//! Target schemas for structured provider output.

use crate::query::ResponseFormat;

/// A schema that a parsed JSON value must satisfy before it is accepted.
///
/// `validate` owns the value so implementations can deserialize and
/// transform it (e.g. expanding compact encodings) in one pass. Returning
/// `Err` with a human-readable message marks the payload as a schema
/// violation.
pub trait ResultSchema: Send + Sync + 'static {
    /// Validated payload type
    type Output: Clone + std::fmt::Debug + Send + Sync + 'static;

    /// Schema name sent to providers that support enforced output
    fn name(&self) -> &'static str;

    /// JSON Schema document describing the expected payload
    fn json_schema(&self) -> serde_json::Value;

    /// Check field presence, ranges, lengths and enums
    fn validate(&self, value: serde_json::Value) -> Result<Self::Output, String>;

    fn response_format(&self) -> ResponseFormat {
        ResponseFormat {
            name: self.name().to_string(),
            schema: self.json_schema(),
        }
    }
}

/// Check an array length against inclusive bounds
pub fn check_len(field: &str, len: usize, min: usize, max: usize) -> Result<(), String> {
    if len < min || len > max {
        return Err(format!(
            "`{}` must contain {}..={} items, got {}",
            field, min, max, len
        ));
    }
    Ok(())
}

/// Check an integer against inclusive bounds
pub fn check_range(field: &str, value: i64, min: i64, max: i64) -> Result<(), String> {
    if value < min || value > max {
        return Err(format!(
            "`{}` must be within {}..={}, got {}",
            field, min, max, value
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len_bounds_are_inclusive() {
        assert!(check_len("t", 1, 1, 10).is_ok());
        assert!(check_len("t", 10, 1, 10).is_ok());
        assert!(check_len("t", 0, 1, 10).is_err());
        let err = check_len("t", 11, 1, 10).unwrap_err();
        assert_eq!(err, "`t` must contain 1..=10 items, got 11");
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("s", 0, 0, 100).is_ok());
        assert!(check_range("s", 100, 0, 100).is_ok());
        assert!(check_range("s", 150, 0, 100).is_err());
        assert!(check_range("s", -1, 0, 100).is_err());
    }
}
