//! Check command

use colored::Colorize;
use forms_engine::check_schema;

use super::{read_document, FieldMessage, FormFile};
use crate::output::OutputFormat;

pub fn handle(form: &str, format: OutputFormat) -> Result<(), String> {
    let file: FormFile = read_document(form)?;
    let title = file.title().unwrap_or(form).to_string();
    let fields = file.into_fields();

    match check_schema(&fields) {
        Ok(()) => {
            println!("{} {}: {} field(s) OK", "✓".green(), title, fields.len());
            Ok(())
        }
        Err(e) => {
            format.print_rows(vec![FieldMessage {
                field: title,
                error: e.to_string(),
            }]);
            Err("form definition is invalid".into())
        }
    }
}
