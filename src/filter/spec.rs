use serde::Deserialize;
use std::collections::HashMap;

/// Date comparison operators as the model is taught to emit them.
pub const OP_GT: &str = "$gt";
pub const OP_LT: &str = "$lt";
pub const OP_EQ: &str = "$eq";

/// One constraint on a field: either a substring to match, or a mapping of
/// comparison operators to date strings (only meaningful for `due_date`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    Text(String),
    DateRange(HashMap<String, String>),
}

/// Structured translation of a natural-language query, e.g.
/// `{"status": "late", "city": "Springfield"}` or
/// `{"due_date": {"$gt": "2023-12-31"}}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterSpec(pub HashMap<String, Condition>);

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_conditions() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"status": "late", "city": "Springfield"}"#).unwrap();
        assert_eq!(
            spec.0.get("status"),
            Some(&Condition::Text("late".to_string()))
        );
        assert_eq!(
            spec.0.get("city"),
            Some(&Condition::Text("Springfield".to_string()))
        );
    }

    #[test]
    fn test_parse_date_range() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"due_date": {"$gt": "2023-12-31"}}"#).unwrap();
        match spec.0.get("due_date") {
            Some(Condition::DateRange(ops)) => {
                assert_eq!(ops.get(OP_GT).map(String::as_str), Some("2023-12-31"));
            }
            other => panic!("expected date range, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_object_is_empty_spec() {
        let spec: FilterSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_non_string_scalar_rejected() {
        // Fail-closed: a shape we cannot apply must not half-parse.
        assert!(serde_json::from_str::<FilterSpec>(r#"{"latitude": 39.78}"#).is_err());
    }
}
