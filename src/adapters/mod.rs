//! Adapter layer modules for external system integration.
//!
//! Provides the HTTP adapter for the remote task endpoint.

pub mod task_http_client;
