//! Observability setup shared by lessonline binaries.

pub mod tracing_setup;
