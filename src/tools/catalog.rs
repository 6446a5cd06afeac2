//! Static tool descriptors
//!
//! Descriptions and schemas are part of the contract with existing agent
//! integrations and must not drift.

use super::{ToolDescriptor, ToolKind};
use once_cell::sync::Lazy;
use serde_json::json;

pub const DEFAULT_SCRAPE_FORMAT: &str = "markdown";
pub const DEFAULT_SCRAPE_MAX_CHARS: u64 = 50_000;
pub const DEFAULT_SEARCH_COUNT: u64 = 5;

static CATALOG: Lazy<Vec<ToolDescriptor>> =
    Lazy::new(|| ToolKind::ALL.into_iter().map(describe).collect());

/// Full catalog in advertised order
pub fn catalog() -> &'static [ToolDescriptor] {
    &CATALOG
}

pub(crate) fn describe(kind: ToolKind) -> ToolDescriptor {
    let (description, input_schema) = match kind {
        ToolKind::ScrapeUrl => (
            "Scrape a URL and return clean content as markdown, text, or JSON. Strips scripts/nav/headers. $0.005/call.",
            json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "description": "URL to scrape" },
                    "format": {
                        "type": "string",
                        "enum": ["markdown", "text", "json"],
                        "default": DEFAULT_SCRAPE_FORMAT,
                        "description": "Output format"
                    },
                    "max_chars": {
                        "type": "number",
                        "default": DEFAULT_SCRAPE_MAX_CHARS,
                        "description": "Maximum characters to return"
                    }
                },
                "required": ["url"]
            }),
        ),
        ToolKind::ValidateEmail => (
            "Validate an email address: format check, MX record verification, disposable domain detection. $0.002/call.",
            json!({
                "type": "object",
                "properties": {
                    "email": { "type": "string", "description": "Email address to validate" }
                },
                "required": ["email"]
            }),
        ),
        ToolKind::DnsLookup => (
            "Full DNS record lookup: A, AAAA, MX, NS, TXT, CNAME records for any domain. $0.003/call.",
            json!({
                "type": "object",
                "properties": {
                    "domain": { "type": "string", "description": "Domain to look up" }
                },
                "required": ["domain"]
            }),
        ),
        ToolKind::WebSearch => (
            "Search the web via Brave Search API. Returns titles, URLs, and snippets. $0.005/call.",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query" },
                    "count": {
                        "type": "number",
                        "default": DEFAULT_SEARCH_COUNT,
                        "description": "Number of results (1-10)"
                    }
                },
                "required": ["query"]
            }),
        ),
        ToolKind::ConvertFormat => (
            "Convert between HTML, Markdown, and plain text. Bidirectional. $0.001/call.",
            json!({
                "type": "object",
                "properties": {
                    "content": { "type": "string", "description": "Content to convert" },
                    "from_format": {
                        "type": "string",
                        "enum": ["html", "markdown", "text"],
                        "description": "Source format"
                    },
                    "to_format": {
                        "type": "string",
                        "enum": ["html", "markdown", "text"],
                        "description": "Target format"
                    }
                },
                "required": ["content", "from_format", "to_format"]
            }),
        ),
    };

    ToolDescriptor {
        name: kind.name().to_string(),
        description: description.to_string(),
        input_schema,
    }
}
