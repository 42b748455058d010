//! Display formatting for response tables
//!
//! Renders a stored record as a short cell string. Anything that does not
//! parse renders as `-`.

use crate::config::{EngineConfig, DEFAULT_DATE_DISPLAY_FORMAT, DEFAULT_DISPLAY_MAX_LENGTH};
use crate::domain::value_objects::value::parse_instant;
use crate::domain::value_objects::{FieldKind, FileMeta, StorageRecord};

/// Placeholder for empty or unreadable values
pub const EMPTY_CELL: &str = "-";

/// Render `record` with the default date format
pub fn format_for_display(record: &StorageRecord, max_length: usize) -> String {
    DisplayFormatter {
        max_length,
        date_format: DEFAULT_DATE_DISPLAY_FORMAT.into(),
    }
    .format(record)
}

/// Formatter carrying display settings
#[derive(Debug, Clone)]
pub struct DisplayFormatter {
    max_length: usize,
    date_format: String,
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_DISPLAY_MAX_LENGTH,
            date_format: DEFAULT_DATE_DISPLAY_FORMAT.into(),
        }
    }
}

impl DisplayFormatter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_length: config.display_max_length,
            date_format: config.date_display_format.clone(),
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn format(&self, record: &StorageRecord) -> String {
        let value = record.value.as_str();
        if value.is_empty() {
            return EMPTY_CELL.into();
        }

        let Some(kind) = record.kind() else {
            tracing::warn!(field = %record.field_id, kind = %record.field_kind, "unknown field kind");
            return EMPTY_CELL.into();
        };

        match kind {
            FieldKind::Text | FieldKind::Email | FieldKind::Textarea => self.truncate(value),
            FieldKind::Number | FieldKind::Select => value.to_string(),
            FieldKind::Date => match parse_instant(value) {
                Some(instant) => self.render_date(record, &instant),
                None => {
                    tracing::warn!(field = %record.field_id, value, "date cell does not parse");
                    EMPTY_CELL.into()
                }
            },
            FieldKind::Boolean => {
                let label = if value == "true" { "Yes" } else { "No" };
                label.to_string()
            }
            FieldKind::MultiSelect => match serde_json::from_str::<Vec<String>>(value) {
                Ok(items) if !items.is_empty() => items.join(", "),
                Ok(_) => EMPTY_CELL.into(),
                Err(e) => {
                    tracing::warn!(field = %record.field_id, error = %e, "multiselect cell does not parse");
                    EMPTY_CELL.into()
                }
            },
            FieldKind::File => match serde_json::from_str::<Option<FileMeta>>(value) {
                Ok(Some(meta)) => format!("📎 {}", meta.name),
                Ok(None) => EMPTY_CELL.into(),
                Err(e) => {
                    tracing::warn!(field = %record.field_id, error = %e, "file cell does not parse");
                    EMPTY_CELL.into()
                }
            },
        }
    }

    fn truncate(&self, value: &str) -> String {
        match value.char_indices().nth(self.max_length) {
            Some((cut, _)) => format!("{}...", &value[..cut]),
            None => value.to_string(),
        }
    }

    fn render_date(&self, record: &StorageRecord, instant: &chrono::DateTime<chrono::Utc>) -> String {
        use std::fmt::Write;

        // chrono reports a bad format string as a fmt::Error while writing
        let mut rendered = String::new();
        match write!(rendered, "{}", instant.format(&self.date_format)) {
            Ok(()) => rendered,
            Err(_) => {
                tracing::warn!(field = %record.field_id, format = %self.date_format, "invalid date display format");
                instant.format(DEFAULT_DATE_DISPLAY_FORMAT).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: FieldKind, value: &str) -> StorageRecord {
        StorageRecord::new("4", "Field", kind, value)
    }

    #[test]
    fn test_empty_value() {
        for kind in FieldKind::ALL {
            assert_eq!(format_for_display(&record(kind, ""), 50), "-");
        }
    }

    #[test]
    fn test_boolean() {
        assert_eq!(format_for_display(&record(FieldKind::Boolean, "true"), 50), "Yes");
        assert_eq!(format_for_display(&record(FieldKind::Boolean, "false"), 50), "No");
        assert_eq!(format_for_display(&record(FieldKind::Boolean, "True"), 50), "No");
    }

    #[test]
    fn test_text_truncation() {
        assert_eq!(format_for_display(&record(FieldKind::Text, "short"), 50), "short");
        assert_eq!(format_for_display(&record(FieldKind::Textarea, "abcdefgh"), 5), "abcde...");
        assert_eq!(format_for_display(&record(FieldKind::Email, "abcde"), 5), "abcde");
        assert_eq!(format_for_display(&record(FieldKind::Text, "héllo wörld"), 4), "héll...");
    }

    #[test]
    fn test_scalars_verbatim() {
        assert_eq!(format_for_display(&record(FieldKind::Number, "3.5"), 2), "3.5");
        assert_eq!(format_for_display(&record(FieldKind::Select, "Pro plan"), 3), "Pro plan");
    }

    #[test]
    fn test_date() {
        assert_eq!(
            format_for_display(&record(FieldKind::Date, "2024-01-05T10:30:00.000Z"), 50),
            "1/5/2024"
        );
        assert_eq!(format_for_display(&record(FieldKind::Date, "garbage"), 50), "-");
    }

    #[test]
    fn test_custom_date_format() {
        let config = EngineConfig {
            date_display_format: "%Y-%m-%d".into(),
            ..Default::default()
        };
        let formatter = DisplayFormatter::new(&config);
        assert_eq!(formatter.format(&record(FieldKind::Date, "2024-01-05T10:30:00.000Z")), "2024-01-05");
    }

    #[test]
    fn test_bad_date_format_falls_back() {
        let config = EngineConfig {
            date_display_format: "%Q".into(),
            ..Default::default()
        };
        let formatter = DisplayFormatter::new(&config);
        assert_eq!(formatter.format(&record(FieldKind::Date, "2024-12-31T23:00:00.000Z")), "12/31/2024");
    }

    #[test]
    fn test_unknown_kind() {
        let mut cell = record(FieldKind::Text, "M");
        cell.field_kind = "radio".into();
        assert_eq!(format_for_display(&cell, 50), "-");
    }

    #[test]
    fn test_multiselect() {
        assert_eq!(
            format_for_display(&record(FieldKind::MultiSelect, r#"["Red","Blue"]"#), 50),
            "Red, Blue"
        );
        assert_eq!(format_for_display(&record(FieldKind::MultiSelect, "[]"), 50), "-");
        assert_eq!(format_for_display(&record(FieldKind::MultiSelect, "Red"), 50), "-");
    }

    #[test]
    fn test_file() {
        assert_eq!(
            format_for_display(
                &record(FieldKind::File, r#"{"name":"cv.pdf","size":10,"type":"application/pdf"}"#),
                50
            ),
            "📎 cv.pdf"
        );
        assert_eq!(format_for_display(&record(FieldKind::File, "null"), 50), "-");
        assert_eq!(format_for_display(&record(FieldKind::File, "{oops"), 50), "-");
    }
}
