//! Typed argument records for each tool
//!
//! Arguments are checked for required fields and JSON types only. Enum
//! membership and numeric ranges are left to the backend, so `format`-like
//! fields stay strings and counts stay plain JSON numbers.

use super::catalog::{DEFAULT_SCRAPE_FORMAT, DEFAULT_SCRAPE_MAX_CHARS, DEFAULT_SEARCH_COUNT};
use super::ToolKind;
use crate::error::BridgeError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Number, Value};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScrapeUrlArgs {
    pub url: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub max_chars: Option<Number>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ValidateEmailArgs {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DnsLookupArgs {
    pub domain: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WebSearchArgs {
    pub query: String,
    #[serde(default)]
    pub count: Option<Number>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConvertFormatArgs {
    pub content: String,
    pub from_format: String,
    pub to_format: String,
}

/// Parsed arguments for one tool call
#[derive(Debug, Clone, PartialEq)]
pub enum ToolArguments {
    ScrapeUrl(ScrapeUrlArgs),
    ValidateEmail(ValidateEmailArgs),
    DnsLookup(DnsLookupArgs),
    WebSearch(WebSearchArgs),
    ConvertFormat(ConvertFormatArgs),
}

impl ToolArguments {
    /// Parse caller-supplied arguments for `kind`. A missing or `null`
    /// arguments value is read as an empty object.
    pub fn parse(kind: ToolKind, arguments: &Value) -> Result<Self, BridgeError> {
        let arguments = match arguments {
            Value::Null => Value::Object(Default::default()),
            other => other.clone(),
        };

        Ok(match kind {
            ToolKind::ScrapeUrl => ToolArguments::ScrapeUrl(decode(kind, arguments)?),
            ToolKind::ValidateEmail => ToolArguments::ValidateEmail(decode(kind, arguments)?),
            ToolKind::DnsLookup => ToolArguments::DnsLookup(decode(kind, arguments)?),
            ToolKind::WebSearch => ToolArguments::WebSearch(decode(kind, arguments)?),
            ToolKind::ConvertFormat => ToolArguments::ConvertFormat(decode(kind, arguments)?),
        })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolArguments::ScrapeUrl(_) => ToolKind::ScrapeUrl,
            ToolArguments::ValidateEmail(_) => ToolKind::ValidateEmail,
            ToolArguments::DnsLookup(_) => ToolKind::DnsLookup,
            ToolArguments::WebSearch(_) => ToolKind::WebSearch,
            ToolArguments::ConvertFormat(_) => ToolKind::ConvertFormat,
        }
    }

    /// Backend request body with catalog defaults filled in. Fields the
    /// tool does not declare are never forwarded.
    pub fn to_request_body(&self) -> Value {
        match self {
            ToolArguments::ScrapeUrl(args) => json!({
                "url": args.url,
                "format": args.format.as_deref().unwrap_or(DEFAULT_SCRAPE_FORMAT),
                "max_chars": args
                    .max_chars
                    .clone()
                    .unwrap_or_else(|| Number::from(DEFAULT_SCRAPE_MAX_CHARS)),
            }),
            ToolArguments::ValidateEmail(args) => json!({ "email": args.email }),
            ToolArguments::DnsLookup(args) => json!({ "domain": args.domain }),
            ToolArguments::WebSearch(args) => json!({
                "query": args.query,
                "count": args
                    .count
                    .clone()
                    .unwrap_or_else(|| Number::from(DEFAULT_SEARCH_COUNT)),
            }),
            ToolArguments::ConvertFormat(args) => json!({
                "content": args.content,
                "from_format": args.from_format,
                "to_format": args.to_format,
            }),
        }
    }
}

fn decode<T: DeserializeOwned>(kind: ToolKind, arguments: Value) -> Result<T, BridgeError> {
    serde_json::from_value(arguments).map_err(|e| BridgeError::invalid_arguments(kind, e))
}
