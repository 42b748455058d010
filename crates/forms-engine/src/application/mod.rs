//! Application layer
//!
//! Orchestrates the domain services for a form-filling session.

pub mod session;

pub use session::FormSession;
