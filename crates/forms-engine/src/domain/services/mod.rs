//! Domain services module
//!
//! Stateless operations over the response store: field access with
//! coercion, storage conversion, validation, schema checks and display.

pub mod accessor;
pub mod converter;
pub mod validator;
pub mod display;
pub mod schema;

pub use accessor::{coerce, read, update};
pub use converter::{from_storage, to_storage};
pub use validator::{validate, Validator};
pub use display::{format_for_display, DisplayFormatter};
pub use schema::check_schema;
