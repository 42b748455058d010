//! Backend converter
//!
//! Moves responses between the typed [`ResponseStore`] and the flat list
//! of [`StorageRecord`]s a persistence layer keeps.
//!
//! Encodings per kind:
//!
//! | kind        | stored value                                 |
//! |-------------|----------------------------------------------|
//! | text-like   | the text                                     |
//! | number      | decimal string (`42`, `3.5`, `NaN`)          |
//! | date        | ISO-8601 instant, `""` for an invalid date   |
//! | boolean     | `true` / `false`                             |
//! | select      | the selected option                          |
//! | multiselect | JSON array of strings                        |
//! | file        | JSON object (`name`, `size`, `type`) or `null` |
//!
//! A number or date field that was never answered is stored as `""`, and
//! an empty stored value loads back as unanswered, so validation gives the
//! same result before and after a round trip.

use crate::domain::aggregates::ResponseStore;
use crate::domain::services::accessor;
use crate::domain::value_objects::value::{format_instant, format_number, parse_instant, parse_number};
use crate::domain::value_objects::{FieldKind, FieldSchema, FieldValue, FileMeta, StorageRecord};

/// One record per field, in field order
pub fn to_storage(store: &ResponseStore, fields: &[FieldSchema]) -> Vec<StorageRecord> {
    fields
        .iter()
        .map(|field| {
            let value = match field.kind {
                FieldKind::Number | FieldKind::Date if !store.is_touched(&field.id) => String::new(),
                _ => encode(&accessor::read(store, field)),
            };
            StorageRecord::new(field.id.clone(), field.title.clone(), field.kind, value)
        })
        .collect()
}

/// Rebuild a typed store from persisted records
///
/// Records for unknown fields are skipped. An empty value leaves the
/// field at its zero value, unanswered. Values that fail to parse fall
/// back to the kind's zero value and are logged.
pub fn from_storage(records: &[StorageRecord], fields: &[FieldSchema]) -> ResponseStore {
    let mut store = ResponseStore::initialize(fields);
    for record in records {
        let Some(field) = fields.iter().find(|f| f.id == record.field_id) else {
            tracing::debug!(field = %record.field_id, "skipping record for unknown field");
            continue;
        };
        if record.value.is_empty() {
            continue;
        }
        if record.kind() != Some(field.kind) {
            tracing::debug!(
                field = %field.id,
                stored = %record.field_kind,
                expected = %field.kind,
                "record kind differs from schema, decoding by schema"
            );
        }
        store = store.with_value(field.id.clone(), decode(field, &record.value));
    }
    store
}

/// Stored string for a typed value
pub fn encode(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) | FieldValue::Select(s) => s.clone(),
        FieldValue::Number(n) => format_number(*n),
        FieldValue::Date(Some(instant)) => format_instant(instant),
        FieldValue::Date(None) => String::new(),
        FieldValue::Boolean(b) => b.to_string(),
        FieldValue::MultiSelect(items) => {
            serde_json::to_string(items).unwrap_or_else(|_| "[]".into())
        }
        FieldValue::File(meta) => serde_json::to_string(meta).unwrap_or_else(|_| "null".into()),
    }
}

/// Typed value of `field` from its stored string
pub fn decode(field: &FieldSchema, raw: &str) -> FieldValue {
    match field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Textarea => FieldValue::Text(raw.to_string()),
        FieldKind::Select => FieldValue::Select(raw.to_string()),
        FieldKind::Number => FieldValue::Number(parse_number(raw).unwrap_or_else(|| {
            tracing::warn!(field = %field.id, value = raw, "stored number does not parse");
            0.0
        })),
        FieldKind::Date => {
            let instant = parse_instant(raw);
            if instant.is_none() {
                tracing::warn!(field = %field.id, value = raw, "stored date does not parse");
            }
            FieldValue::Date(instant)
        }
        FieldKind::Boolean => FieldValue::Boolean(raw == "true"),
        FieldKind::MultiSelect => {
            FieldValue::MultiSelect(serde_json::from_str::<Vec<String>>(raw).unwrap_or_else(|e| {
                tracing::warn!(field = %field.id, error = %e, "stored multiselect is not a string array");
                Vec::new()
            }))
        }
        FieldKind::File => {
            FieldValue::File(serde_json::from_str::<Option<FileMeta>>(raw).unwrap_or_else(|e| {
                tracing::warn!(field = %field.id, error = %e, "stored file metadata is malformed");
                None
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::validator;
    use crate::domain::value_objects::FieldConstraints;
    use chrono::{TimeZone, Utc};

    fn fields() -> Vec<FieldSchema> {
        vec![
            FieldSchema::new("1", FieldKind::Text, "Name"),
            FieldSchema::new("2", FieldKind::Number, "Age"),
            FieldSchema::new("3", FieldKind::Date, "Start"),
            FieldSchema::new("4", FieldKind::Boolean, "Subscribe"),
            FieldSchema::new("5", FieldKind::Select, "Plan").with_options(["Free", "Pro"]),
            FieldSchema::new("6", FieldKind::MultiSelect, "Colors").with_options(["Red", "Blue"]),
            FieldSchema::new("7", FieldKind::File, "Resume"),
        ]
    }

    fn value_of<'a>(records: &'a [StorageRecord], id: &str) -> &'a str {
        &records.iter().find(|r| r.field_id.as_str() == id).unwrap().value
    }

    #[test]
    fn test_blank_store_encoding() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let fields = fields();
        let records = to_storage(&ResponseStore::initialize_at(&fields, now), &fields);

        assert_eq!(records.len(), fields.len());
        assert_eq!(value_of(&records, "1"), "");
        assert_eq!(value_of(&records, "2"), "");
        assert_eq!(value_of(&records, "3"), "");
        assert_eq!(value_of(&records, "4"), "false");
        assert_eq!(value_of(&records, "5"), "");
        assert_eq!(value_of(&records, "6"), "[]");
        assert_eq!(value_of(&records, "7"), "null");
    }

    #[test]
    fn test_records_follow_field_order() {
        let fields = fields();
        let records = to_storage(&ResponseStore::initialize(&fields), &fields);
        let ids: Vec<_> = records.iter().map(|r| r.field_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7"]);
        assert_eq!(records[1].field_name, "Age");
        assert_eq!(records[1].kind(), Some(FieldKind::Number));
    }

    #[test]
    fn test_updated_values_encoding() {
        let fields = fields();
        let mut store = ResponseStore::initialize(&fields);
        store = accessor::update(&store, &fields[0], "hello world");
        store = accessor::update(&store, &fields[1], 3.5);
        store = accessor::update(&store, &fields[5], vec!["Red", "Blue"]);
        store = accessor::update(
            &store,
            &fields[6],
            FileMeta::new("cv.pdf", 1024, "application/pdf"),
        );

        let records = to_storage(&store, &fields);
        assert_eq!(value_of(&records, "1"), "hello world");
        assert_eq!(value_of(&records, "2"), "3.5");
        assert_eq!(value_of(&records, "6"), r#"["Red","Blue"]"#);
        assert_eq!(
            value_of(&records, "7"),
            r#"{"name":"cv.pdf","size":1024,"type":"application/pdf"}"#
        );
    }

    #[test]
    fn test_round_trip() {
        let fields = fields();
        let mut store = ResponseStore::initialize(&fields);
        store = accessor::update(&store, &fields[0], "Ada");
        store = accessor::update(&store, &fields[1], 36);
        store = accessor::update(&store, &fields[2], "2024-02-29T12:00:00.250Z");
        store = accessor::update(&store, &fields[3], true);
        store = accessor::update(&store, &fields[4], "Pro");
        store = accessor::update(&store, &fields[5], vec!["Blue"]);

        let restored = from_storage(&to_storage(&store, &fields), &fields);
        assert_eq!(restored, store);
    }

    #[test]
    fn test_malformed_values_degrade() {
        let fields = fields();
        let records = vec![
            StorageRecord::new("2", "Age", FieldKind::Number, "old"),
            StorageRecord::new("3", "Start", FieldKind::Date, "yesterday"),
            StorageRecord::new("4", "Subscribe", FieldKind::Boolean, "TRUE"),
            StorageRecord::new("6", "Colors", FieldKind::MultiSelect, "not json"),
            StorageRecord::new("7", "Resume", FieldKind::File, r#"{"name":"x"}"#),
        ];
        let store = from_storage(&records, &fields);

        assert_eq!(accessor::read(&store, &fields[1]), FieldValue::Number(0.0));
        assert_eq!(accessor::read(&store, &fields[2]), FieldValue::Date(None));
        assert_eq!(accessor::read(&store, &fields[3]), FieldValue::Boolean(false));
        assert_eq!(accessor::read(&store, &fields[5]), FieldValue::MultiSelect(vec![]));
        assert_eq!(accessor::read(&store, &fields[6]), FieldValue::File(None));
    }

    #[test]
    fn test_multiselect_with_non_string_elements_discarded() {
        let fields = fields();
        let records = vec![StorageRecord::new("6", "Colors", FieldKind::MultiSelect, r#"["Red", 1]"#)];
        let store = from_storage(&records, &fields);
        assert_eq!(accessor::read(&store, &fields[5]), FieldValue::MultiSelect(vec![]));
    }

    #[test]
    fn test_unknown_records_ignored() {
        let fields = fields();
        let records = vec![StorageRecord::new("99", "Ghost", FieldKind::Text, "boo")];
        let store = from_storage(&records, &fields);
        assert_eq!(store.len(), fields.len());
        assert!(!store.contains(&"99".into()));
    }

    #[test]
    fn test_loaded_fields_are_touched() {
        let fields = fields();
        let records = vec![
            StorageRecord::new("2", "Age", FieldKind::Number, "0"),
            StorageRecord::new("3", "Start", FieldKind::Date, ""),
        ];
        let store = from_storage(&records, &fields);
        assert!(store.is_touched(&"2".into()));
        assert!(!store.is_touched(&"3".into()));
        assert!(!store.is_touched(&"1".into()));
    }

    #[test]
    fn test_answered_zero_is_stored() {
        let fields = fields();
        let store = accessor::update(&ResponseStore::initialize(&fields), &fields[1], 0);
        let records = to_storage(&store, &fields);
        assert_eq!(value_of(&records, "2"), "0");
        assert!(from_storage(&records, &fields).is_touched(&"2".into()));
    }

    #[test]
    fn test_round_trip_keeps_validation() {
        let fields = vec![
            FieldSchema::new("age", FieldKind::Number, "Age").required(),
            FieldSchema::new("visit", FieldKind::Date, "Visit").required(),
            FieldSchema::new("guests", FieldKind::Number, "Guests")
                .with_constraints(FieldConstraints { min: Some(1.0), ..Default::default() }),
        ];
        let store = ResponseStore::initialize(&fields);
        let restored = from_storage(&to_storage(&store, &fields), &fields);

        assert_eq!(restored, store);
        let errors = validator::validate(&restored, &fields);
        assert_eq!(errors, validator::validate(&store, &fields));
        assert_eq!(errors.get(&"age".into()), Some("Age is required"));
        assert_eq!(errors.get(&"visit".into()), Some("Visit is required"));
        assert!(!errors.contains(&"guests".into()));
    }

    #[test]
    fn test_nan_round_trip() {
        let fields = fields();
        let store = accessor::update(&ResponseStore::initialize(&fields), &fields[1], f64::NAN);
        let records = to_storage(&store, &fields);
        assert_eq!(value_of(&records, "2"), "NaN");
        assert_eq!(from_storage(&records, &fields), store);
    }

    #[test]
    fn test_unknown_record_kind_decodes_by_schema() {
        let fields = fields();
        let mut record = StorageRecord::new("2", "Age", FieldKind::Number, "41");
        record.field_kind = "integer".into();
        let store = from_storage(&[record], &fields);
        assert_eq!(accessor::read(&store, &fields[1]), FieldValue::Number(41.0));
    }

    #[test]
    fn test_invalid_date_encodes_empty() {
        assert_eq!(encode(&FieldValue::Date(None)), "");
        assert_eq!(encode(&FieldValue::Number(f64::INFINITY)), "Infinity");
    }
}
