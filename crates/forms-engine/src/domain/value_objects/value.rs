//! Typed field values
//!
//! `FieldValue` is one variant per storage-relevant kind. Text, email and
//! textarea all hold `Text`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::field::FieldKind;

/// File identity without the binary content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Base64 content, only when a caller chose to embed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            url: None,
            data: None,
        }
    }
}

/// Current value of one field
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    /// `None` is an instant that failed to parse
    Date(Option<DateTime<Utc>>),
    Boolean(bool),
    Select(String),
    MultiSelect(Vec<String>),
    File(Option<FileMeta>),
}

/// `NaN` numbers compare equal, so a stored `NaN` survives a storage round trip
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) | (Self::Select(a), Self::Select(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::MultiSelect(a), Self::MultiSelect(b)) => a == b,
            (Self::File(a), Self::File(b)) => a == b,
            _ => false,
        }
    }
}

impl FieldValue {
    /// Zero value a freshly initialized field holds
    pub fn zero(kind: FieldKind, now: DateTime<Utc>) -> Self {
        match kind {
            FieldKind::Text | FieldKind::Email | FieldKind::Textarea => Self::Text(String::new()),
            FieldKind::Number => Self::Number(0.0),
            FieldKind::Date => Self::Date(Some(to_millis(now))),
            FieldKind::Boolean => Self::Boolean(false),
            FieldKind::Select => Self::Select(String::new()),
            FieldKind::MultiSelect => Self::MultiSelect(Vec::new()),
            FieldKind::File => Self::File(None),
        }
    }

    /// Whether this variant is the one `kind` stores
    pub fn matches_kind(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Text(_), FieldKind::Text | FieldKind::Email | FieldKind::Textarea)
                | (Self::Number(_), FieldKind::Number)
                | (Self::Date(_), FieldKind::Date)
                | (Self::Boolean(_), FieldKind::Boolean)
                | (Self::Select(_), FieldKind::Select)
                | (Self::MultiSelect(_), FieldKind::MultiSelect)
                | (Self::File(_), FieldKind::File)
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Select(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => *d,
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::MultiSelect(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileMeta> {
        match self {
            Self::File(meta) => meta.as_ref(),
            _ => None,
        }
    }
}

/// Drop sub-millisecond precision, the resolution of the ISO encoding
pub fn to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(3)
}

/// Full ISO-8601 instant, e.g. `2024-01-15T10:30:00.000Z`
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an instant from RFC 3339, a naive date-time or a plain date
///
/// Inputs without an offset are read as UTC.
pub fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(to_millis(dt.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(to_millis(naive.and_utc()));
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Decimal rendering of a number, matching the default numeric-to-string
/// conversion of the storage format (`42`, `3.5`, `1e+21`, `NaN`)
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return s.to_string();
    }
    if n == 0.0 {
        return "0".into();
    }
    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{:e}", n);
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => s,
        };
    }
    n.to_string()
}

/// Numeric parse of stored or typed text; blank text reads as zero
pub fn parse_number(input: &str) -> Option<f64> {
    let input = input.trim();
    match input {
        "" => Some(0.0),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ if input.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => None,
        _ => input.parse().ok(),
    }
}
