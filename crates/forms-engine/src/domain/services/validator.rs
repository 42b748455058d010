//! Response validation
//!
//! Required fields must hold a non-empty value. Constraints apply to any
//! field that holds a value, required or not: an optional field may be
//! blank, but not malformed.

use regex::Regex;
use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::domain::aggregates::ResponseStore;
use crate::domain::services::accessor;
use crate::domain::value_objects::value::format_number;
use crate::domain::value_objects::{FieldId, FieldSchema, FieldValue, ValidationErrors};

const INVALID_FORMAT: &str = "Invalid format";
const INVALID_SELECTION: &str = "Invalid selection";

/// Validate a store against its fields with default settings
pub fn validate(store: &ResponseStore, fields: &[FieldSchema]) -> ValidationErrors {
    Validator::new(fields).validate(store)
}

/// Whether `field` counts as unanswered in `store`
///
/// Number and date fields start out holding a zero value, so for them an
/// untouched field is empty as well.
pub fn is_empty(store: &ResponseStore, field: &FieldSchema) -> bool {
    let untouched = !store.is_touched(&field.id);
    match accessor::read(store, field) {
        FieldValue::Text(s) => s.trim().is_empty(),
        FieldValue::Number(n) => n.is_nan() || untouched,
        FieldValue::Date(instant) => instant.is_none() || untouched,
        FieldValue::Boolean(_) => false,
        FieldValue::Select(s) => s.is_empty(),
        FieldValue::MultiSelect(items) => items.is_empty(),
        FieldValue::File(meta) => meta.is_none(),
    }
}

/// Validator with patterns compiled once for a field collection
pub struct Validator<'a> {
    fields: &'a [FieldSchema],
    patterns: HashMap<FieldId, Regex>,
    enforce_option_sets: bool,
}

impl<'a> Validator<'a> {
    pub fn new(fields: &'a [FieldSchema]) -> Self {
        let patterns = fields
            .iter()
            .filter(|field| field.kind.is_text_like())
            .filter_map(|field| {
                let pattern = field.constraints.as_ref()?.pattern.as_ref()?;
                match Regex::new(pattern) {
                    Ok(re) => Some((field.id.clone(), re)),
                    Err(e) => {
                        tracing::warn!(field = %field.id, error = %e, "skipping pattern that does not compile");
                        None
                    }
                }
            })
            .collect();

        Self {
            fields,
            patterns,
            enforce_option_sets: false,
        }
    }

    pub fn with_config(fields: &'a [FieldSchema], config: &EngineConfig) -> Self {
        Self::new(fields).enforce_option_sets(config.enforce_option_sets)
    }

    /// Also reject select/multiselect values outside the field's options
    pub fn enforce_option_sets(mut self, enforce: bool) -> Self {
        self.enforce_option_sets = enforce;
        self
    }

    pub fn validate(&self, store: &ResponseStore) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in self.fields {
            if let Some(message) = self.check_field(store, field) {
                errors.insert(field.id.clone(), message);
            }
        }
        errors
    }

    /// Message of the last failing check, if any
    fn check_field(&self, store: &ResponseStore, field: &FieldSchema) -> Option<String> {
        if is_empty(store, field) {
            return field.required.then(|| format!("{} is required", field.title));
        }

        let value = accessor::read(store, field);
        let mut message = None;

        if let Some(constraints) = &field.constraints {
            match &value {
                FieldValue::Text(text) if field.kind.is_text_like() => {
                    let length = text.chars().count();
                    if let Some(min) = constraints.min_length.filter(|min| length < *min) {
                        message = Some(format!("Minimum {} characters required", min));
                    }
                    if let Some(max) = constraints.max_length.filter(|max| length > *max) {
                        message = Some(format!("Maximum {} characters allowed", max));
                    }
                    if let Some(re) = self.patterns.get(&field.id) {
                        if !re.is_match(text) {
                            message = Some(
                                field.error_message.clone().unwrap_or_else(|| INVALID_FORMAT.into()),
                            );
                        }
                    }
                }
                FieldValue::Number(n) => {
                    if let Some(min) = constraints.min.filter(|min| n < min) {
                        message = Some(format!("Minimum value is {}", format_number(min)));
                    }
                    if let Some(max) = constraints.max.filter(|max| n > max) {
                        message = Some(format!("Maximum value is {}", format_number(max)));
                    }
                }
                _ => {}
            }
        }

        if self.enforce_option_sets && field.kind.is_choice() && !field.options.is_empty() {
            let allowed = |choice: &String| field.options.contains(choice);
            let valid = match &value {
                FieldValue::Select(choice) => allowed(choice),
                FieldValue::MultiSelect(choices) => choices.iter().all(allowed),
                _ => true,
            };
            if !valid {
                message = Some(INVALID_SELECTION.into());
            }
        }

        message
    }
}
