//! Client configuration
//!
//! `ClientConfig` is assembled with a builder. Values can come from code,
//! from a YAML/JSON config file, or from the environment. Each merge step
//! only fills fields that are still unset, so the order of calls decides
//! precedence.

use crate::auth::BearerToken;
use crate::error::{Error, Result};
use crate::http::TransportConfig;
use crate::pagination::PageCount;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Public Cloudflare API root
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

/// Environment variable overriding the API root
pub const BASE_URL_ENV: &str = "CLOUDFLARE_API_BASE_URL";

// ============================================================================
// Client Config
// ============================================================================

/// Immutable client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// API token
    pub token: BearerToken,
    /// Page-count strategy for listings
    pub page_count: PageCount,
    /// Settings for the default transport
    pub transport: TransportConfig,
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a config from `CLOUDFLARE_API_TOKEN` / `CLOUDFLARE_API_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::builder().merge_env().build()
    }

    /// Build a config from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().merge_file(ConfigFile::load(path)?).build()
    }
}

/// Strip trailing slashes from an API root
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ============================================================================
// Config File
// ============================================================================

/// On-disk configuration (YAML or JSON)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// API token
    #[serde(default)]
    pub token: Option<BearerToken>,
    /// API root
    #[serde(default)]
    pub base_url: Option<String>,
    /// Page-count strategy
    #[serde(default)]
    pub page_count: Option<PageCount>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// User agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ConfigFile {
    /// Load from a file path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse YAML (JSON being a subset)
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ClientConfig`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    token: Option<BearerToken>,
    page_count: Option<PageCount>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the API root
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API token
    #[must_use]
    pub fn token(mut self, token: impl Into<BearerToken>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the page-count strategy
    #[must_use]
    pub fn page_count(mut self, page_count: PageCount) -> Self {
        self.page_count = Some(page_count);
        self
    }

    /// Set the request timeout of the default transport
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent of the default transport
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Fill unset fields from a config file
    #[must_use]
    pub fn merge_file(mut self, file: ConfigFile) -> Self {
        self.token = self.token.or(file.token);
        self.base_url = self.base_url.or(file.base_url);
        self.page_count = self.page_count.or(file.page_count);
        self.timeout = self.timeout.or(file.timeout_secs.map(Duration::from_secs));
        self.user_agent = self.user_agent.or(file.user_agent);
        self
    }

    /// Fill unset fields from the process environment
    #[must_use]
    pub fn merge_env(self) -> Self {
        self.merge_lookup(|key| std::env::var(key).ok())
    }

    /// Fill unset fields from an environment-like lookup
    #[must_use]
    pub fn merge_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.token.is_none() {
            self.token = lookup(TOKEN_ENV).map(BearerToken::from);
        }
        if self.base_url.is_none() {
            self.base_url = lookup(BASE_URL_ENV);
        }
        self
    }

    /// Build the config
    pub fn build(self) -> Result<ClientConfig> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::missing_field("token"))?;

        let base_url =
            normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL));
        if base_url.is_empty() {
            return Err(Error::config("base_url must not be empty"));
        }

        let mut transport = TransportConfig::default();
        if let Some(timeout) = self.timeout {
            transport.timeout = timeout;
        }
        if let Some(agent) = self.user_agent {
            transport.user_agent = agent;
        }

        Ok(ClientConfig {
            base_url,
            token,
            page_count: self.page_count.unwrap_or_default(),
            transport,
        })
    }
}
