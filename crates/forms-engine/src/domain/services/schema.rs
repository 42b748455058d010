//! Field collection checks
//!
//! Run once when a form is loaded, before any session works with it.

use regex::Regex;
use std::collections::HashSet;

use crate::domain::value_objects::{FieldKind, FieldSchema};
use crate::error::{FormsError, Result};

/// Reject field collections the engine cannot serve consistently
pub fn check_schema(fields: &[FieldSchema]) -> Result<()> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.id.as_str().trim().is_empty() {
            return Err(FormsError::EmptyFieldId);
        }
        if !seen.insert(&field.id) {
            return Err(FormsError::DuplicateField(field.id.clone()));
        }
        check_field(field)?;
    }
    Ok(())
}

fn check_field(field: &FieldSchema) -> Result<()> {
    let invalid = |reason: &str| FormsError::InvalidSchema {
        field: field.id.clone(),
        reason: reason.to_string(),
    };

    if !field.options.is_empty() && !field.kind.is_choice() {
        return Err(invalid("options are only allowed on select and multiselect fields"));
    }

    let Some(constraints) = &field.constraints else {
        return Ok(());
    };

    if constraints.has_text_rules() && !field.kind.is_text_like() {
        return Err(invalid("length and pattern constraints need a text-like field"));
    }
    if constraints.has_numeric_rules() && field.kind != FieldKind::Number {
        return Err(invalid("min/max constraints need a number field"));
    }
    if let (Some(min), Some(max)) = (constraints.min_length, constraints.max_length) {
        if min > max {
            return Err(invalid("minLength exceeds maxLength"));
        }
    }
    if let (Some(min), Some(max)) = (constraints.min, constraints.max) {
        if min > max {
            return Err(invalid("min exceeds max"));
        }
    }
    if let Some(pattern) = &constraints.pattern {
        Regex::new(pattern).map_err(|e| invalid(&format!("pattern does not compile: {}", e)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldConstraints;

    #[test]
    fn test_valid_schema() {
        let fields = vec![
            FieldSchema::new("1", FieldKind::Text, "Name").required(),
            FieldSchema::new("2", FieldKind::Select, "Plan").with_options(["Free", "Pro"]),
        ];
        assert!(check_schema(&fields).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let fields = vec![
            FieldSchema::new("1", FieldKind::Text, "Name"),
            FieldSchema::new("1", FieldKind::Number, "Age"),
        ];
        assert!(matches!(check_schema(&fields), Err(FormsError::DuplicateField(id)) if id.as_str() == "1"));
    }

    #[test]
    fn test_empty_id() {
        let fields = vec![FieldSchema::new(" ", FieldKind::Text, "Name")];
        assert!(matches!(check_schema(&fields), Err(FormsError::EmptyFieldId)));
    }

    #[test]
    fn test_options_on_text_field() {
        let fields = vec![FieldSchema::new("1", FieldKind::Text, "Name").with_options(["a"])];
        assert!(matches!(check_schema(&fields), Err(FormsError::InvalidSchema { .. })));
    }

    #[test]
    fn test_constraint_kind_mismatch() {
        let fields = vec![FieldSchema::new("1", FieldKind::Number, "Age")
            .with_constraints(FieldConstraints { min_length: Some(1), ..Default::default() })];
        assert!(check_schema(&fields).is_err());

        let fields = vec![FieldSchema::new("1", FieldKind::Text, "Name")
            .with_constraints(FieldConstraints { max: Some(1.0), ..Default::default() })];
        assert!(check_schema(&fields).is_err());
    }

    #[test]
    fn test_inverted_bounds() {
        let fields = vec![FieldSchema::new("1", FieldKind::Text, "Name")
            .with_constraints(FieldConstraints { min_length: Some(9), max_length: Some(3), ..Default::default() })];
        assert!(check_schema(&fields).is_err());
    }

    #[test]
    fn test_bad_pattern() {
        let fields = vec![FieldSchema::new("1", FieldKind::Email, "Email")
            .with_constraints(FieldConstraints { pattern: Some("[".into()), ..Default::default() })];
        let err = check_schema(&fields).unwrap_err();
        assert!(err.to_string().contains("pattern does not compile"));
    }
}
