use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use crate::data::records::{PromiseRecord, RecordStore, FIELDS};
use crate::filter::spec::{Condition, FilterSpec, OP_EQ, OP_GT, OP_LT};

/// Apply a filter spec to the store. Conditions compose conjunctively, both
/// across fields and across operators on the same field. Keys outside the
/// schema are ignored; a condition whose shape does not fit its field (a
/// substring match against a date or numeric column, an operator mapping on
/// anything but `due_date`, an unparseable date) is an error, which the
/// query pipeline maps to an empty result.
pub fn apply(store: &RecordStore, spec: &FilterSpec) -> Result<Vec<PromiseRecord>> {
    let mut kept: Vec<PromiseRecord> = store.records().to_vec();

    for (field, condition) in &spec.0 {
        if !FIELDS.contains(&field.as_str()) {
            continue;
        }

        match condition {
            Condition::Text(value) => {
                if !is_text_field(field) {
                    bail!("Field '{}' does not support substring matching", field);
                }
                let needle = value.to_lowercase();
                kept.retain(|r| {
                    text_field(r, field)
                        .map(|haystack| haystack.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                });
            }
            Condition::DateRange(ops) => {
                if field != "due_date" {
                    bail!("Field '{}' does not support date operators", field);
                }
                for (op, value) in ops {
                    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .with_context(|| format!("Invalid date value '{}'", value))?;
                    match op.as_str() {
                        OP_GT => kept.retain(|r| r.due_date > date),
                        OP_LT => kept.retain(|r| r.due_date < date),
                        OP_EQ => kept.retain(|r| r.due_date == date),
                        // Unknown operators are skipped, as the prompt only
                        // teaches the model these three.
                        _ => {}
                    }
                }
            }
        }
    }

    Ok(kept)
}

fn is_text_field(field: &str) -> bool {
    matches!(field, "city" | "category" | "promise_description" | "status")
}

fn text_field<'a>(record: &'a PromiseRecord, field: &str) -> Option<&'a str> {
    match field {
        "city" => Some(&record.city),
        "category" => Some(&record.category),
        "promise_description" => Some(&record.promise_description),
        "status" => Some(&record.status),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(city: &str, status: &str, due: &str) -> PromiseRecord {
        PromiseRecord {
            city: city.to_string(),
            category: "Infrastructure".to_string(),
            promise_description: format!("A promise made in {}", city),
            due_date: NaiveDate::parse_from_str(due, "%Y-%m-%d").unwrap(),
            status: status.to_string(),
            latitude: Some(39.78),
            longitude: Some(-89.65),
        }
    }

    fn two_record_store() -> RecordStore {
        RecordStore::new(vec![
            record("Springfield", "late", "2023-01-01"),
            record("Shelbyville", "on-time", "2024-06-01"),
        ])
    }

    fn spec(json: &str) -> FilterSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_status_match() {
        let result = apply(&two_record_store(), &spec(r#"{"status": "late"}"#)).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city, "Springfield");
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let result = apply(&two_record_store(), &spec(r#"{"city": "SHELBY"}"#)).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city, "Shelbyville");
    }

    #[test]
    fn test_due_date_greater_than() {
        let result = apply(
            &two_record_store(),
            &spec(r#"{"due_date": {"$gt": "2023-12-31"}}"#),
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city, "Shelbyville");
    }

    #[test]
    fn test_due_date_less_than() {
        let result = apply(
            &two_record_store(),
            &spec(r#"{"due_date": {"$lt": "2023-12-31"}}"#),
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city, "Springfield");
    }

    #[test]
    fn test_due_date_equal() {
        let result = apply(
            &two_record_store(),
            &spec(r#"{"due_date": {"$eq": "2024-06-01"}}"#),
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city, "Shelbyville");
    }

    #[test]
    fn test_conditions_compose_conjunctively() {
        let store = RecordStore::new(vec![
            record("Springfield", "late", "2023-01-01"),
            record("Springfield", "on-time", "2024-06-01"),
            record("Shelbyville", "late", "2023-03-01"),
        ]);
        let result = apply(&store, &spec(r#"{"city": "Springfield", "status": "late"}"#)).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].due_date.to_string(), "2023-01-01");
    }

    #[test]
    fn test_date_operators_compose_conjunctively() {
        let store = RecordStore::new(vec![
            record("Springfield", "late", "2023-01-01"),
            record("Shelbyville", "on-time", "2024-06-01"),
            record("Ogdenville", "due", "2025-01-01"),
        ]);
        let result = apply(
            &store,
            &spec(r#"{"due_date": {"$gt": "2023-06-01", "$lt": "2024-12-31"}}"#),
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city, "Shelbyville");
    }

    #[test]
    fn test_unknown_field_ignored() {
        let result = apply(
            &two_record_store(),
            &spec(r#"{"mayor": "Quimby", "status": "late"}"#),
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city, "Springfield");
    }

    #[test]
    fn test_unknown_operator_skipped() {
        let result = apply(
            &two_record_store(),
            &spec(r#"{"due_date": {"$gte": "2023-12-31"}}"#),
        )
        .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_empty_spec_keeps_everything() {
        let result = apply(&two_record_store(), &FilterSpec::default()).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_order_preserved() {
        let result = apply(&two_record_store(), &spec(r#"{"category": "Infra"}"#)).unwrap();
        assert_eq!(result[0].city, "Springfield");
        assert_eq!(result[1].city, "Shelbyville");
    }

    #[test]
    fn test_idempotent() {
        let store = two_record_store();
        let s = spec(r#"{"status": "late"}"#);
        let first = apply(&store, &s).unwrap();
        let second = apply(&store, &s).unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].city, second[0].city);
    }

    #[test]
    fn test_text_condition_on_due_date_is_error() {
        assert!(apply(&two_record_store(), &spec(r#"{"due_date": "2023"}"#)).is_err());
    }

    #[test]
    fn test_operator_map_on_string_field_is_error() {
        assert!(apply(
            &two_record_store(),
            &spec(r#"{"city": {"$gt": "2023-01-01"}}"#)
        )
        .is_err());
    }

    #[test]
    fn test_bad_date_value_is_error() {
        assert!(apply(
            &two_record_store(),
            &spec(r#"{"due_date": {"$gt": "next year"}}"#)
        )
        .is_err());
    }
}
