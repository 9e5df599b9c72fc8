//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cloudflare Zero Trust users and cache purge
#[derive(Parser, Debug)]
#[command(name = "flarelist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API token (falls back to the config file, then CLOUDFLARE_API_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API root (default: https://api.cloudflare.com/client/v4)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Fetch the trailing partial page when total_count is not a multiple of per_page
    #[arg(long, global = true)]
    pub ceil_pages: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all Zero Trust users of an account
    Users {
        /// Account identifier
        #[arg(long)]
        account: String,
    },

    /// Purge everything cached for a zone
    Purge {
        /// Zone identifier
        #[arg(long)]
        zone: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Human-readable output
    Pretty,
}
