//! Form-filling session
//!
//! Drives one response from blank (or resumed) store to submission:
//! UI updates by field id, undo/redo over prior stores, validation, and
//! conversion to storage records once the response is valid.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::domain::aggregates::ResponseStore;
use crate::domain::services::{accessor, check_schema, converter, Validator};
use crate::domain::value_objects::{FieldId, FieldSchema, FieldValue, RawInput, StorageRecord, ValidationErrors};
use crate::error::{FormsError, Result};

/// One user's in-progress response to a form
#[derive(Debug, Clone)]
pub struct FormSession {
    id: Uuid,
    fields: Vec<FieldSchema>,
    index: HashMap<FieldId, usize>,
    config: EngineConfig,
    current: ResponseStore,
    undo: VecDeque<ResponseStore>,
    redo: Vec<ResponseStore>,
    started_at: DateTime<Utc>,
}

impl FormSession {
    /// Start a blank response with default settings
    pub fn new(fields: Vec<FieldSchema>) -> Result<Self> {
        Self::with_config(fields, EngineConfig::default())
    }

    pub fn with_config(fields: Vec<FieldSchema>, config: EngineConfig) -> Result<Self> {
        let store = ResponseStore::initialize(&fields);
        Self::build(fields, config, store)
    }

    /// Continue a response from persisted records
    pub fn resume(fields: Vec<FieldSchema>, records: &[StorageRecord], config: EngineConfig) -> Result<Self> {
        let store = converter::from_storage(records, &fields);
        Self::build(fields, config, store)
    }

    fn build(fields: Vec<FieldSchema>, config: EngineConfig, current: ResponseStore) -> Result<Self> {
        check_schema(&fields)?;
        config.check()?;

        let index = fields
            .iter()
            .enumerate()
            .map(|(i, field)| (field.id.clone(), i))
            .collect();
        let session = Self {
            id: Uuid::new_v4(),
            fields,
            index,
            config,
            current,
            undo: VecDeque::new(),
            redo: Vec::new(),
            started_at: Utc::now(),
        };
        tracing::debug!(session = %session.id, fields = session.fields.len(), "form session started");
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current store
    pub fn store(&self) -> &ResponseStore {
        &self.current
    }

    pub fn field(&self, field_id: &FieldId) -> Result<&FieldSchema> {
        self.index
            .get(field_id)
            .map(|&i| &self.fields[i])
            .ok_or_else(|| FormsError::UnknownField(field_id.clone()))
    }

    pub fn value(&self, field_id: &FieldId) -> Result<FieldValue> {
        let field = self.field(field_id)?;
        Ok(accessor::read(&self.current, field))
    }

    /// Apply a UI value to a field; clears the redo history
    pub fn set(&mut self, field_id: &FieldId, raw: impl Into<RawInput>) -> Result<&ResponseStore> {
        let field = self.field(field_id)?;
        let next = accessor::update(&self.current, field, raw);

        let previous = std::mem::replace(&mut self.current, next);
        self.push_undo(previous);
        self.redo.clear();
        Ok(&self.current)
    }

    /// Step back to the previous store; false when there is none
    pub fn undo(&mut self) -> bool {
        match self.undo.pop_back() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.current, previous);
                self.redo.push(current);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone change; false when there is none
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.current, next);
                self.push_undo(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn validate(&self) -> ValidationErrors {
        Validator::with_config(&self.fields, &self.config).validate(&self.current)
    }

    /// Storage records of the current store, valid or not (draft save)
    pub fn records(&self) -> Vec<StorageRecord> {
        converter::to_storage(&self.current, &self.fields)
    }

    /// Storage records, provided the response passes validation
    pub fn submit(&self) -> Result<Vec<StorageRecord>> {
        let errors = self.validate();
        if !errors.is_valid() {
            tracing::info!(session = %self.id, invalid = errors.len(), "submission rejected");
            return Err(FormsError::Validation(errors));
        }
        tracing::info!(session = %self.id, "submission accepted");
        Ok(self.records())
    }

    fn push_undo(&mut self, store: ResponseStore) {
        if self.config.history_limit == 0 {
            return;
        }
        if self.undo.len() == self.config.history_limit {
            self.undo.pop_front();
        }
        self.undo.push_back(store);
    }
}
