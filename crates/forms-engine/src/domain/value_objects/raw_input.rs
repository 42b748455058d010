//! Loosely-typed UI input
//!
//! Values arriving from form widgets carry no static type. `RawInput` is
//! the one place that union is spelled out; the field accessor turns it
//! into a strict `FieldValue`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value::FileMeta;

/// Transport-level file handle as delivered by an upload widget
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<i64>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            last_modified: None,
        }
    }

    /// Identity of the file, without content
    pub fn to_meta(&self) -> FileMeta {
        FileMeta::new(self.name.clone(), self.size, self.mime_type.clone())
    }
}

/// Raw value supplied by a UI event handler
#[derive(Clone, Debug, PartialEq)]
pub enum RawInput {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
    List(Vec<RawInput>),
    File(FileHandle),
    /// Object already shaped like `FileMeta`
    Meta(FileMeta),
    Object(serde_json::Map<String, serde_json::Value>),
}

impl RawInput {
    /// JavaScript-style truthiness
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Date(_) | Self::List(_) | Self::File(_) | Self::Meta(_) | Self::Object(_) => true,
        }
    }

    /// Elements when every one of them is text
    pub fn as_string_list(&self) -> Option<Vec<String>> {
        match self {
            Self::List(items) => items
                .iter()
                .map(|item| match item {
                    Self::Text(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Date(_) => "date",
            Self::List(_) => "array",
            Self::File(_) => "file",
            Self::Meta(_) => "file-meta",
            Self::Object(_) => "object",
        }
    }
}

impl From<bool> for RawInput {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for RawInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for RawInput {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for RawInput {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for RawInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<DateTime<Utc>> for RawInput {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl From<Vec<String>> for RawInput {
    fn from(items: Vec<String>) -> Self {
        Self::List(items.into_iter().map(Self::Text).collect())
    }
}

impl From<Vec<&str>> for RawInput {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(Self::from).collect())
    }
}

impl From<FileHandle> for RawInput {
    fn from(handle: FileHandle) -> Self {
        Self::File(handle)
    }
}

impl From<FileMeta> for RawInput {
    fn from(meta: FileMeta) -> Self {
        Self::Meta(meta)
    }
}

impl<T: Into<RawInput>> From<Option<T>> for RawInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for RawInput {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                match serde_json::from_value::<FileMeta>(Value::Object(map.clone())) {
                    Ok(meta) => Self::Meta(meta),
                    Err(_) => Self::Object(map),
                }
            }
        }
    }
}
