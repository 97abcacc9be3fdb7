//! Structured logging for slashgate.
//!
//! Handles subscriber setup, file rotation, and token redaction for log output.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::{redact_sensitive_data, redact_token};
