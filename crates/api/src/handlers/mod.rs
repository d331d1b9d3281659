//! HTTP request handlers, one module per resource.

pub mod items;
pub mod points;
