//! Observability for the EagleForge tools server
//!
//! Structured logging only; the server keeps no metrics of its own.

pub mod logging;

pub use logging::{init_logging, init_logging_with_verbosity, LogFormat};

// Span macros for structured logging
pub use logging::{rpc_span, tool_span};
