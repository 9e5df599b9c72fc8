//! CLI module
//!
//! Command-line interface over the API client.
//!
//! # Commands
//!
//! - `users` - List every Zero Trust user of an account
//! - `purge` - Purge a zone's cache

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
