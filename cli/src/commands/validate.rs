//! Validate command

use colored::Colorize;
use forms_engine::{FormSession, ValidationErrors};

use super::{load_fields, load_records, FieldMessage};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn handle(form: &str, records: &str, config: &Config, format: OutputFormat) -> Result<(), String> {
    let fields = load_fields(form)?;
    let records = load_records(records)?;
    let session = FormSession::resume(fields, &records, config.engine.clone()).map_err(|e| e.to_string())?;

    let errors = session.validate();
    if errors.is_valid() {
        println!("{} response is valid", "✓".green());
        return Ok(());
    }

    format.print_rows(error_rows(&errors));
    Err(format!("{} field(s) invalid", errors.len()).red().to_string())
}

pub fn error_rows(errors: &ValidationErrors) -> Vec<FieldMessage> {
    errors
        .iter()
        .map(|(field, message)| FieldMessage {
            field: field.to_string(),
            error: message.to_string(),
        })
        .collect()
}
