//! Protocol message types for the Model Context Protocol surface
//!
//! `jsonrpc` holds the JSON-RPC 2.0 envelope; `messages` holds the MCP
//! payloads carried inside it.

pub mod jsonrpc;
pub mod messages;

pub use jsonrpc::*;
pub use messages::*;
