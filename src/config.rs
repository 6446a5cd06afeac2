//! Configuration for the EagleForge tools server
//!
//! Values are resolved once at startup, lowest precedence first: built-in
//! defaults, an optional TOML file, then the `EAGLEFORGE_API_URL` and
//! `EAGLEFORGE_API_KEY` environment variables. The resulting
//! [`ServerConfig`] is read-only for the life of the process.
//!
//! ```toml
//! [backend]
//! base_url = "https://eagleforge-tools-api-production.up.railway.app"
//! api_key = "eagle-demo-key-2026"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://eagleforge-tools-api-production.up.railway.app";
pub const DEFAULT_API_KEY: &str = "eagle-demo-key-2026";

pub const API_URL_ENV: &str = "EAGLEFORGE_API_URL";
pub const API_KEY_ENV: &str = "EAGLEFORGE_API_KEY";

/// Root configuration
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default)]
    pub backend: BackendSection,
}

/// Backend tools service the server forwards calls to
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendSection {
    /// Base URL; requests go to `{base_url}/tools/{endpoint}`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as the `X-API-Key` header
    #[serde(default = "default_api_key")]
    pub api_key: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ServerConfig {
    /// Resolve the process configuration from all sources and validate it
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file; missing fields keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay environment variables. Unset and empty variables are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = non_empty(API_URL_ENV) {
            self.backend.base_url = base_url;
        }
        if let Some(api_key) = non_empty(API_KEY_ENV) {
            self.backend.api_key = api_key;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.backend.base_url).map_err(|e| {
            ConfigError::InvalidConfig(format!(
                "backend base URL '{}' is not a valid URL: {e}",
                self.backend.base_url
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidConfig(format!(
                "backend base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.backend.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "backend API key must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Full URL for a backend tool endpoint
    pub fn tool_url(&self, endpoint: &str) -> String {
        format!(
            "{}/tools/{}",
            self.backend.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Copy safe to print or log
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.backend.api_key = mask_secret(&self.backend.api_key);
        copy
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("backend", &self.backend)
            .finish()
    }
}

impl fmt::Debug for BackendSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSection")
            .field("base_url", &self.base_url)
            .field("api_key", &mask_secret(&self.api_key))
            .finish()
    }
}

/// Keep a short prefix so operators can tell keys apart
fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "***".to_string()
    } else {
        format!("{prefix}***")
    }
}
