//! EagleForge Tools MCP Server
//!
//! Exposes the EagleForge paid tools API (web scraping, email validation, DNS
//! lookup, web search, format conversion) to AI agents over the Model Context
//! Protocol.
//!
//! # Overview
//!
//! The crate is a protocol bridge. It does no scraping, resolving or
//! converting itself:
//! - a static tool catalog answers `tools/list`
//! - the dispatcher turns `tools/call` into one authenticated POST against the
//!   backend and wraps the JSON answer in the MCP result envelope
//! - a newline-delimited JSON-RPC transport runs it all over stdio
//!
//! # Quick Start
//!
//! ```no_run
//! use eagleforge_tools_mcp::config::ServerConfig;
//! use eagleforge_tools_mcp::dispatcher::{Dispatcher, HttpBackend};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(ServerConfig::load(None)?);
//! let dispatcher = Dispatcher::new(Arc::new(HttpBackend::new(config)?));
//!
//! let result = dispatcher
//!     .call_tool("dns_lookup", &json!({"domain": "example.com"}))
//!     .await;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod observability;
pub mod protocol;
pub mod server;
pub mod testing;
pub mod tools;
pub mod transport;

pub use config::{ConfigError, ServerConfig};
pub use dispatcher::{Dispatcher, HttpBackend, ToolBackend};
pub use error::{BridgeError, BridgeResult};
pub use protocol::{CallToolResult, ContentBlock};
pub use server::McpServer;
pub use tools::{catalog, ToolDescriptor, ToolKind};
