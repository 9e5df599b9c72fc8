//! Bearer token handling

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

/// API token applied as a bearer `Authorization` header
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw API token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Check whether the token is empty
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The raw token value
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Build the `Authorization` header value, marked sensitive
    pub fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0))
            .map_err(|e| Error::create_request(format!("invalid token: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Insert the `Authorization` header into a header map
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        headers.insert(AUTHORIZATION, self.header_value()?);
        Ok(())
    }
}

impl From<String> for BearerToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for BearerToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}
