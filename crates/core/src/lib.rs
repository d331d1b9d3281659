//! Ecoleta domain library.
//!
//! Shared types, the domain error taxonomy, and the registration form
//! state machine used by both the API server and the client crates.

pub mod error;
pub mod registration;
pub mod types;
