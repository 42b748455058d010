//! Persistence-facing shapes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::field::{FieldId, FieldKind};

/// Flat, string-valued form of one field's answer
///
/// One record exists per field per submission. Multiselect and file
/// values are JSON-encoded into `value`. The kind is kept as the stored
/// string so a record written by a newer form version still loads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRecord {
    pub field_id: FieldId,
    #[serde(default)]
    pub field_name: String,
    pub field_kind: String,
    #[serde(default)]
    pub value: String,
}

impl StorageRecord {
    pub fn new(
        field_id: impl Into<FieldId>,
        field_name: impl Into<String>,
        field_kind: FieldKind,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            field_name: field_name.into(),
            field_kind: field_kind.as_str().to_string(),
            value: value.into(),
        }
    }

    /// Parsed kind, `None` when the stored name is not a known kind
    pub fn kind(&self) -> Option<FieldKind> {
        self.field_kind.parse().ok()
    }
}

/// Per-field error messages; a missing key means the field is valid
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FieldId, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message, replacing any earlier one for the field.
    /// Empty messages are ignored.
    pub fn insert(&mut self, field_id: FieldId, message: impl Into<String>) {
        let message = message.into();
        if !message.is_empty() {
            self.0.insert(field_id, message);
        }
    }

    pub fn get(&self, field_id: &FieldId) -> Option<&str> {
        self.0.get(field_id).map(String::as_str)
    }

    pub fn contains(&self, field_id: &FieldId) -> bool {
        self.0.contains_key(field_id)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &str)> {
        self.0.iter().map(|(id, message)| (id, message.as_str()))
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a FieldId, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldId, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
