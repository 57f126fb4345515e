//! Cross-service plumbing shared by Faregate binaries.

pub mod tracing;
