//! Middleware for API request processing.

pub mod tracing;
