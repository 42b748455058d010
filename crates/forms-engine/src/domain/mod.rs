//! Domain module
//!
//! Field schemas, typed values, the response store and the services that
//! operate on them.

pub mod aggregates;
pub mod value_objects;
pub mod services;

pub use aggregates::*;
pub use value_objects::*;
