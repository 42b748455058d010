//! OpenSASE Forms Engine
//!
//! Typed form-response engine behind the form builder: holds a form's
//! answers in strongly-typed state, converts them to and from the flat
//! string records the persistence layer stores, validates required and
//! constrained fields, and renders stored answers for response tables.
//!
//! ## Architecture
//!
//! - **Value Objects**: field schemas, typed values, raw UI input, storage records
//! - **Aggregates**: the persistent `ResponseStore`
//! - **Domain Services**: accessor, converter, validator, display formatter
//! - **Application Layer**: `FormSession` with undo/redo and submission
//!
//! ## Data flow
//!
//! UI input goes through `update` into a new store, `validate` gates the
//! submission, `to_storage` produces the records to persist and
//! `from_storage` brings them back. `format_for_display` renders a single
//! stored record for a table cell.
//!
//! None of the engine operations fail: malformed input and unreadable
//! stored values fall back to zero values (and are logged through
//! `tracing`). Validation errors are the only failures reported.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;

pub use application::FormSession;
pub use config::EngineConfig;
pub use domain::aggregates::ResponseStore;
pub use domain::services::{
    check_schema, coerce, format_for_display, from_storage, read, to_storage, update, validate,
    DisplayFormatter, Validator,
};
pub use domain::value_objects::{
    FieldConstraints, FieldId, FieldKind, FieldSchema, FieldValue, FileHandle, FileMeta, RawInput,
    StorageRecord, ValidationErrors,
};
pub use error::{FormsError, Result};
