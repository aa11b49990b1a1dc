//! Utility modules for error handling, configuration and tool discovery

pub mod config;
pub mod error;
pub mod log_sink;
pub mod tools;

// Re-export for convenience
pub use config::{CliArgs, ServerSettings};
pub use error::{ErrorKind, Y2LocalError};
pub use log_sink::{LogSink, MemoryLogSink, TracingLogSink};
