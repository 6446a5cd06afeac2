//! Error types for the tool bridge
//!
//! Every failure of a tool call is one [`BridgeError`] variant. At the
//! protocol boundary the error is folded into a single text message via
//! [`BridgeError::to_envelope_text`], so agents only ever see a well-formed
//! error envelope.

use crate::tools::ToolKind;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

const MAX_MESSAGE_LEN: usize = 500;
const TRUNCATE_SUFFIX: &str = "...[truncated]";

static SECRET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(password|token|key|secret)[=:]\s*\S+").expect("secret pattern is valid")
});

static SENSITIVE_PATH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-zA-Z0-9._/-]+/(secrets?|\.ssh|\.aws|\.config)/[a-zA-Z0-9._/-]+")
        .expect("path pattern is valid")
});

/// Failure of a single tool call
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Backend response is not valid JSON: {0}")]
    Serialization(String),
}

impl BridgeError {
    pub fn unknown_tool<S: Into<String>>(name: S) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn invalid_arguments<E: std::fmt::Display>(tool: ToolKind, error: E) -> Self {
        Self::InvalidArguments {
            tool: tool.name().to_string(),
            message: error.to_string(),
        }
    }

    /// Transport failure with the full source chain in the message
    pub fn transport<E: std::error::Error>(error: E) -> Self {
        Self::Transport(error_chain(&error))
    }

    pub fn backend<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Backend {
            status,
            body: body.into(),
        }
    }

    pub fn serialization<E: std::fmt::Display>(error: E) -> Self {
        Self::Serialization(error.to_string())
    }

    /// Whether the backend was contacted before the failure
    pub fn reached_backend(&self) -> bool {
        matches!(
            self,
            BridgeError::Transport(_) | BridgeError::Backend { .. } | BridgeError::Serialization(_)
        )
    }

    /// Message text for the error envelope returned to the agent
    pub fn to_envelope_text(&self) -> String {
        match self {
            BridgeError::UnknownTool(_) => self.to_string(),
            other => format!("Error: {}", sanitize_error_message(&other.to_string())),
        }
    }
}

/// Join an error and its sources, `outer: inner: root`
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// Mask credentials and sensitive paths, and cap the length
pub fn sanitize_error_message(message: &str) -> String {
    let sanitized = SECRET_PATTERN.replace_all(message, "${1}=***");
    let mut sanitized = SENSITIVE_PATH_PATTERN
        .replace_all(&sanitized, "/***REDACTED***/")
        .into_owned();

    if sanitized.len() > MAX_MESSAGE_LEN {
        let mut cut = MAX_MESSAGE_LEN - TRUNCATE_SUFFIX.len();
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str(TRUNCATE_SUFFIX);
    }

    sanitized
}

pub type BridgeResult<T> = Result<T, BridgeError>;
