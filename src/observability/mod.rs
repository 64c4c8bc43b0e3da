//! Logging infrastructure.
//!
//! Provides:
//! - Structured console logging via tracing-subscriber

pub mod tracing;
