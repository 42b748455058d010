//! Blank and fill commands

use forms_engine::{FieldId, FormSession, FormsError, RawInput, StorageRecord};
use serde::Serialize;
use tabled::Tabled;

use super::{load_fields, load_records, validate::error_rows};
use crate::config::Config;
use crate::output::OutputFormat;

#[derive(Debug, Serialize, Tabled)]
pub struct RecordRow {
    #[tabled(rename = "Field")]
    pub field_id: String,
    #[tabled(rename = "Name")]
    pub field_name: String,
    #[tabled(rename = "Kind")]
    pub field_kind: String,
    #[tabled(rename = "Stored value")]
    pub value: String,
}

impl From<StorageRecord> for RecordRow {
    fn from(record: StorageRecord) -> Self {
        Self {
            field_id: record.field_id.to_string(),
            field_name: record.field_name,
            field_kind: record.field_kind,
            value: record.value,
        }
    }
}

pub fn blank(form: &str, config: &Config, format: OutputFormat) -> Result<(), String> {
    let fields = load_fields(form)?;
    let session = FormSession::with_config(fields, config.engine.clone()).map_err(|e| e.to_string())?;
    print_records(session.records(), format);
    Ok(())
}

pub fn handle(
    form: &str,
    records: Option<&str>,
    assignments: &[String],
    draft: bool,
    config: &Config,
    format: OutputFormat,
) -> Result<(), String> {
    let fields = load_fields(form)?;
    let mut session = match records {
        Some(path) => FormSession::resume(fields, &load_records(path)?, config.engine.clone()),
        None => FormSession::with_config(fields, config.engine.clone()),
    }
    .map_err(|e| e.to_string())?;

    for assignment in assignments {
        let (id, raw) = parse_assignment(assignment)?;
        session.set(&id, raw).map_err(|e| e.to_string())?;
    }

    if draft {
        print_records(session.records(), format);
        return Ok(());
    }

    match session.submit() {
        Ok(records) => {
            print_records(records, format);
            Ok(())
        }
        Err(FormsError::Validation(errors)) => {
            format.print_rows(error_rows(&errors));
            Err(format!("{} field(s) invalid", errors.len()))
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Split `id=value`; the value is read as JSON when it parses, else as text
fn parse_assignment(assignment: &str) -> Result<(FieldId, RawInput), String> {
    let (id, value) = assignment
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{}'", assignment))?;
    let raw = serde_json::from_str::<serde_json::Value>(value)
        .map(RawInput::from)
        .unwrap_or_else(|_| RawInput::Text(value.to_string()));
    Ok((FieldId::from(id.trim()), raw))
}

fn print_records(records: Vec<StorageRecord>, format: OutputFormat) {
    match format {
        OutputFormat::Table => format.print_rows(records.into_iter().map(RecordRow::from).collect::<Vec<_>>()),
        _ => format.print(&records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        let (id, raw) = parse_assignment("age=36").unwrap();
        assert_eq!(id.as_str(), "age");
        assert_eq!(raw, RawInput::Number(36.0));

        let (_, raw) = parse_assignment("colors=[\"Red\",\"Blue\"]").unwrap();
        assert_eq!(raw, RawInput::from(vec!["Red", "Blue"]));

        let (_, raw) = parse_assignment("name=Ada Lovelace").unwrap();
        assert_eq!(raw, RawInput::Text("Ada Lovelace".into()));

        let (_, raw) = parse_assignment("note=a=b").unwrap();
        assert_eq!(raw, RawInput::Text("a=b".into()));

        assert!(parse_assignment("name").is_err());
    }
}
