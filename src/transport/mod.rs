//! Transport layer for the MCP server
//!
//! Only newline-delimited JSON-RPC over stdio is supported.

pub mod stdio;

pub use stdio::{serve, serve_stdio};
