//! Aggregates module

pub mod response_store;

pub use response_store::ResponseStore;
