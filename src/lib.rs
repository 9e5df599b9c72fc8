//! # flarelist
//!
//! A small client for the Cloudflare v4 API.
//!
//! ## Features
//!
//! - **Zero Trust users**: list every user of an account; pages after the
//!   first are fetched concurrently and merged
//! - **Cache purge**: purge everything cached for a zone
//! - **Pluggable transport**: requests go through a `Transport` trait, with a
//!   reqwest implementation by default
//!
//! No retries, rate limiting, or concurrency caps are applied.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flarelist::{Client, ClientConfig, Result};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(ClientConfig::from_env()?)?;
//!     let cancel = CancellationToken::new();
//!
//!     let users = client.list_users("account-id", &cancel).await;
//!     if let Some(err) = users.failure() {
//!         eprintln!("incomplete listing ({} users): {err}", users.len());
//!     }
//!
//!     client.purge_cache("zone-id", &cancel).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller ─▶ Client ─▶ collect_pages ─▶ fetch page (Transport) ─▶ decode
//!                          │  page 1 first, then pages 2..N fan out
//!                          └─▶ merged Collected<User> ─▶ caller
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Wire types
pub mod types;

/// Bearer token authentication
pub mod auth;

/// Transport abstraction and request construction
pub mod http;

/// Fan-out page aggregation
pub mod pagination;

/// Client configuration
pub mod config;

/// Cloudflare API client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pagination::{Collected, PageCount};
pub use types::{ResultInfo, User, UsersPage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
