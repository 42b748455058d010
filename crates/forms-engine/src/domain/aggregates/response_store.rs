//! Response Store Aggregate
//!
//! Holds the current value of every field for one form-filling session.
//! The store is a persistent value: every change produces a new store
//! that shares structure with the old one, and the old one stays valid.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{FieldId, FieldSchema, FieldValue};

/// Typed field values of one response
///
/// Besides the values, the store remembers which fields were ever set
/// through an update or loaded from a non-empty stored value. A number or
/// date field that was never touched holds a placeholder zero and counts
/// as unanswered.
#[derive(Clone, Debug, Default)]
pub struct ResponseStore {
    values: im::HashMap<FieldId, FieldValue>,
    touched: im::HashSet<FieldId>,
}

impl ResponseStore {
    /// Seed every field with its kind's zero value
    pub fn initialize(fields: &[FieldSchema]) -> Self {
        Self::initialize_at(fields, Utc::now())
    }

    /// Same as [`ResponseStore::initialize`] with an explicit "now" for date fields
    pub fn initialize_at(fields: &[FieldSchema], now: DateTime<Utc>) -> Self {
        let values = fields
            .iter()
            .map(|field| (field.id.clone(), FieldValue::zero(field.kind, now)))
            .collect();
        Self {
            values,
            touched: im::HashSet::new(),
        }
    }

    pub fn get(&self, field_id: &FieldId) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    pub fn contains(&self, field_id: &FieldId) -> bool {
        self.values.contains_key(field_id)
    }

    /// Whether the field was set since initialization
    pub fn is_touched(&self, field_id: &FieldId) -> bool {
        self.touched.contains(field_id)
    }

    /// The field's value, unless it is an untouched number/date placeholder
    /// or a date that failed to parse
    pub fn answer(&self, field_id: &FieldId) -> Option<&FieldValue> {
        let value = self.values.get(field_id)?;
        match value {
            FieldValue::Number(_) | FieldValue::Date(_) if !self.is_touched(field_id) => None,
            FieldValue::Date(None) => None,
            _ => Some(value),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &FieldValue)> {
        self.values.iter()
    }

    /// New store with one value replaced; `self` is left unchanged
    pub(crate) fn with_value(&self, field_id: FieldId, value: FieldValue) -> Self {
        Self {
            touched: self.touched.update(field_id.clone()),
            values: self.values.update(field_id, value),
        }
    }
}

/// Stores compare by their answers, so two placeholder dates seeded at
/// different instants are equal
impl PartialEq for ResponseStore {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .keys()
                .all(|id| other.contains(id) && self.answer(id) == other.answer(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldKind;
    use chrono::TimeZone;

    fn fields() -> Vec<FieldSchema> {
        vec![
            FieldSchema::new("1", FieldKind::Number, "Age").required(),
            FieldSchema::new("2", FieldKind::Textarea, "Bio"),
            FieldSchema::new("3", FieldKind::Date, "Start"),
        ]
    }

    #[test]
    fn test_initialize_seeds_every_field() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let store = ResponseStore::initialize_at(&fields(), now);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(&"1".into()), Some(&FieldValue::Number(0.0)));
        assert_eq!(store.get(&"2".into()), Some(&FieldValue::Text(String::new())));
        assert_eq!(store.get(&"3".into()), Some(&FieldValue::Date(Some(now))));
        assert!(!store.is_touched(&"1".into()));
    }

    #[test]
    fn test_with_value_leaves_original() {
        let original = ResponseStore::initialize(&fields());
        let updated = original.with_value("1".into(), FieldValue::Number(30.0));

        assert_eq!(original.get(&"1".into()), Some(&FieldValue::Number(0.0)));
        assert_eq!(updated.get(&"1".into()), Some(&FieldValue::Number(30.0)));
        assert!(updated.is_touched(&"1".into()));
        assert!(!original.is_touched(&"1".into()));
    }

    #[test]
    fn test_placeholders_have_no_answer() {
        let store = ResponseStore::initialize(&fields());
        assert_eq!(store.answer(&"1".into()), None);
        assert_eq!(store.answer(&"2".into()), Some(&FieldValue::Text(String::new())));
        assert_eq!(store.answer(&"3".into()), None);

        let store = store.with_value("1".into(), FieldValue::Number(0.0));
        assert_eq!(store.answer(&"1".into()), Some(&FieldValue::Number(0.0)));
        let store = store.with_value("3".into(), FieldValue::Date(None));
        assert_eq!(store.answer(&"3".into()), None);
    }

    #[test]
    fn test_equality_compares_answers() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();
        let a = ResponseStore::initialize_at(&fields(), earlier);
        assert_eq!(a, ResponseStore::initialize_at(&fields(), later));

        let answered = a.with_value("1".into(), FieldValue::Number(0.0));
        assert_ne!(a, answered);
        assert_ne!(a, ResponseStore::initialize_at(&fields()[..2], earlier));
    }
}
