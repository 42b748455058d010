//! CLI Commands

pub mod check;
pub mod config;
pub mod fill;
pub mod show;
pub mod validate;

use forms_engine::{FieldSchema, StorageRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use tabled::Tabled;

/// Form definition file: either a bare field list or a titled form
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FormFile {
    Form {
        #[serde(default)]
        title: Option<String>,
        fields: Vec<FieldSchema>,
    },
    Fields(Vec<FieldSchema>),
}

impl FormFile {
    pub fn title(&self) -> Option<&str> {
        match self {
            FormFile::Form { title, .. } => title.as_deref(),
            FormFile::Fields(_) => None,
        }
    }

    pub fn into_fields(self) -> Vec<FieldSchema> {
        match self {
            FormFile::Form { fields, .. } => fields,
            FormFile::Fields(fields) => fields,
        }
    }
}

/// Read a JSON or YAML document, picked by file extension
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    if path.ends_with(".yaml") || path.ends_with(".yml") {
        serde_yaml::from_str(&content).map_err(|e| format!("{}: {}", path, e))
    } else {
        serde_json::from_str(&content).map_err(|e| format!("{}: {}", path, e))
    }
}

pub fn load_fields(path: &str) -> Result<Vec<FieldSchema>, String> {
    let form: FormFile = read_document(path)?;
    Ok(form.into_fields())
}

pub fn load_records(path: &str) -> Result<Vec<StorageRecord>, String> {
    read_document(path)
}

/// Table row for a field/message pair
#[derive(Debug, Serialize, Tabled)]
pub struct FieldMessage {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Error")]
    pub error: String,
}
