//! Client side of the registration flow.
//!
//! [`api::ApiClient`] talks to the owned registration API;
//! [`flow::RegistrationFlow`] wires it and the geography lookup to the
//! pure form state machine in `ecoleta-core`.

pub mod api;
pub mod flow;
