//! Error types for flarelist
//!
//! Every failure is tagged with the phase it happened in, so callers can
//! tell a bad request from a transport failure or an undecodable body
//! without looking at internal state.

use thiserror::Error;

/// The main error type for flarelist
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("cannot create request: {message}")]
    CreateRequest { message: String, cancelled: bool },

    #[error("cannot send request: {0}")]
    SendRequest(#[source] Box<Error>),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("operation cancelled")]
    Cancelled,

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected status code: {status}")]
    UnexpectedStatus { status: u16 },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("cannot fetch users: {0}")]
    FetchUsers(#[source] Box<Error>),

    #[error("cannot fetch page {page}: {source}")]
    PageFetch { page: u32, source: Box<Error> },

    #[error("Invalid pagination: {message}")]
    Pagination { message: String },

    #[error("Page task failed: {message}")]
    TaskFailed { message: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a request construction error
    pub fn create_request(message: impl Into<String>) -> Self {
        Self::CreateRequest {
            message: message.into(),
            cancelled: false,
        }
    }

    /// Create a request construction error for an already-cancelled token
    pub fn cancelled_request() -> Self {
        Self::CreateRequest {
            message: "context cancelled".to_string(),
            cancelled: true,
        }
    }

    /// Wrap a transport failure
    pub fn send(source: Error) -> Self {
        Self::SendRequest(Box::new(source))
    }

    /// Wrap a first-page failure
    pub fn fetch_users(source: Error) -> Self {
        Self::FetchUsers(Box::new(source))
    }

    /// Wrap a fan-out page failure
    pub fn page_fetch(page: u32, source: Error) -> Self {
        Self::PageFetch {
            page,
            source: Box::new(source),
        }
    }

    /// Create a pagination error
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::Pagination {
            message: message.into(),
        }
    }

    /// Page number of the fan-out fetch that failed, if any
    pub fn failed_page(&self) -> Option<u32> {
        match self {
            Error::PageFetch { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Check whether this error (or the error it wraps) is a cancellation
    pub fn is_cancelled(&self) -> bool {
        match self {
            Error::Cancelled | Error::CreateRequest { cancelled: true, .. } => true,
            Error::SendRequest(inner) | Error::FetchUsers(inner) => inner.is_cancelled(),
            Error::PageFetch { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }
}

/// Result type alias for flarelist
pub type Result<T> = std::result::Result<T, Error>;
