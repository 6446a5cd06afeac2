//! Tool catalog for the EagleForge tools server
//!
//! The set of tools is closed: every tool is a [`ToolKind`] variant, and the
//! variant alone decides the advertised descriptor, the backend endpoint and
//! the shape of the request body. The only string lookup is
//! [`ToolKind::from_name`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod arguments;
pub mod catalog;

pub use arguments::{
    ConvertFormatArgs, DnsLookupArgs, ScrapeUrlArgs, ToolArguments, ValidateEmailArgs,
    WebSearchArgs,
};
pub use catalog::catalog;

/// Every tool this server can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    ScrapeUrl,
    ValidateEmail,
    DnsLookup,
    WebSearch,
    ConvertFormat,
}

impl ToolKind {
    /// All tools in catalog order
    pub const ALL: [ToolKind; 5] = [
        ToolKind::ScrapeUrl,
        ToolKind::ValidateEmail,
        ToolKind::DnsLookup,
        ToolKind::WebSearch,
        ToolKind::ConvertFormat,
    ];

    /// Stable identifier agents use to invoke the tool
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::ScrapeUrl => "scrape_url",
            ToolKind::ValidateEmail => "validate_email",
            ToolKind::DnsLookup => "dns_lookup",
            ToolKind::WebSearch => "web_search",
            ToolKind::ConvertFormat => "convert_format",
        }
    }

    /// Backend path segment, appended to `{base}/tools/`
    pub fn endpoint(self) -> &'static str {
        match self {
            ToolKind::ScrapeUrl => "scrape",
            ToolKind::ValidateEmail => "email-validate",
            ToolKind::DnsLookup => "dns-lookup",
            ToolKind::WebSearch => "search",
            ToolKind::ConvertFormat => "convert",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Descriptor advertised in `tools/list`
    pub fn descriptor(self) -> ToolDescriptor {
        catalog::describe(self)
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Tool descriptor as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}
