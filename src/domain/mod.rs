//! Domain types for the task API: credentials, endpoints, query parameters
//! and wire constants.

pub mod constants;
pub mod query;
pub mod types;
