//! Value Objects module
//!
//! Immutable domain primitives: field schemas, typed values, raw UI
//! input and the flat storage shapes.

pub mod field;
pub mod value;
pub mod raw_input;
pub mod record;

pub use field::{FieldConstraints, FieldId, FieldKind, FieldSchema, UnknownFieldKind};
pub use value::{FieldValue, FileMeta};
pub use raw_input::{FileHandle, RawInput};
pub use record::{StorageRecord, ValidationErrors};
