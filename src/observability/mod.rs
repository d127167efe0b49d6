//! Observability module
//!
//! Structured logging for `docs2schema` runs.

pub mod logging;

pub use logging::{LogFormat, LogSettings, init_logging};
