//! Show command

use forms_engine::DisplayFormatter;
use serde::Serialize;
use tabled::Tabled;

use super::load_records;
use crate::config::Config;
use crate::output::OutputFormat;

#[derive(Debug, Serialize, Tabled)]
pub struct Cell {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub fn handle(records: &str, max_length: Option<usize>, config: &Config, format: OutputFormat) -> Result<(), String> {
    let records = load_records(records)?;
    let formatter = DisplayFormatter::new(&config.engine)
        .with_max_length(max_length.unwrap_or(config.engine.display_max_length));

    let cells = records
        .iter()
        .map(|record| Cell {
            field: if record.field_name.is_empty() {
                record.field_id.to_string()
            } else {
                record.field_name.clone()
            },
            kind: record.field_kind.clone(),
            value: formatter.format(record),
        })
        .collect();
    format.print_rows::<Cell>(cells);
    Ok(())
}
