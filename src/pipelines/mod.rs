//! Workflow pipelines orchestrating stateless services.

pub mod task;
