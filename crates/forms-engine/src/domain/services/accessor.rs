//! Field accessor
//!
//! Reads and writes single field values on a [`ResponseStore`]. Writes go
//! through lenient coercion: whatever the UI hands over is converted to
//! the field's kind, and input that cannot be converted becomes the
//! kind's zero value instead of an error.

use chrono::Utc;

use crate::domain::aggregates::ResponseStore;
use crate::domain::value_objects::value::{format_number, parse_instant, parse_number, to_millis};
use crate::domain::value_objects::{FieldKind, FieldSchema, FieldValue, RawInput};

/// Current value of `field`, or its zero value when the store has none
pub fn read(store: &ResponseStore, field: &FieldSchema) -> FieldValue {
    match store.get(&field.id) {
        Some(value) if value.matches_kind(field.kind) => value.clone(),
        _ => FieldValue::zero(field.kind, Utc::now()),
    }
}

/// New store with `field` set to `raw` coerced to the field's kind
pub fn update(store: &ResponseStore, field: &FieldSchema, raw: impl Into<RawInput>) -> ResponseStore {
    let value = coerce(field.kind, raw.into());
    tracing::trace!(field = %field.id, kind = %field.kind, "field updated");
    store.with_value(field.id.clone(), value)
}

/// Convert a raw UI value to the strict value `kind` stores
pub fn coerce(kind: FieldKind, raw: RawInput) -> FieldValue {
    match kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Textarea => FieldValue::Text(coerce_text(raw)),
        FieldKind::Select => FieldValue::Select(coerce_text(raw)),
        FieldKind::Number => FieldValue::Number(coerce_number(raw)),
        FieldKind::Date => FieldValue::Date(match raw {
            RawInput::Date(instant) => Some(to_millis(instant)),
            RawInput::Text(s) => parse_instant(&s),
            other => {
                tracing::debug!(input = other.type_name(), "non-date input, using now");
                Some(to_millis(Utc::now()))
            }
        }),
        FieldKind::Boolean => FieldValue::Boolean(match raw {
            RawInput::Bool(b) => b,
            other => other.is_truthy(),
        }),
        FieldKind::MultiSelect => FieldValue::MultiSelect(raw.as_string_list().unwrap_or_else(|| {
            tracing::debug!(input = raw.type_name(), "multiselect input is not a string list, clearing");
            Vec::new()
        })),
        FieldKind::File => FieldValue::File(match raw {
            RawInput::File(handle) => Some(handle.to_meta()),
            RawInput::Meta(meta) => Some(meta),
            _ => None,
        }),
    }
}

fn coerce_text(raw: RawInput) -> String {
    match raw {
        RawInput::Text(s) => s,
        RawInput::Number(n) => format_number(n),
        RawInput::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn coerce_number(raw: RawInput) -> f64 {
    match raw {
        RawInput::Number(n) => n,
        RawInput::Text(s) => parse_number(&s).filter(|n| !n.is_nan()).unwrap_or(0.0),
        RawInput::Bool(b) => {
            if b {
                1.0
            } else {
                0.0
            }
        }
        RawInput::Date(instant) => instant.timestamp_millis() as f64,
        _ => 0.0,
    }
}
