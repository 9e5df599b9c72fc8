//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::Client;
use crate::config::{ClientConfig, ConfigFile};
use crate::error::Result;
use crate::pagination::PageCount;
use crate::types::User;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = Client::new(self.client_config()?)?;

        let cancel = CancellationToken::new();
        let interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling outstanding requests");
                interrupt.cancel();
            }
        });

        match &self.cli.command {
            Commands::Users { account } => self.users(&client, account, &cancel).await,
            Commands::Purge { zone } => self.purge(&client, zone, &cancel).await,
        }
    }

    /// Assemble the client config: flags, then config file, then environment
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut builder = ClientConfig::builder();

        if let Some(token) = &self.cli.token {
            builder = builder.token(token.as_str());
        }
        if let Some(base_url) = &self.cli.base_url {
            builder = builder.base_url(base_url.as_str());
        }
        if self.cli.ceil_pages {
            builder = builder.page_count(PageCount::Ceil);
        }
        if let Some(path) = &self.cli.config {
            builder = builder.merge_file(ConfigFile::load(path)?);
        }

        builder.merge_env().build()
    }

    /// List users; a partial listing is printed before the error is returned
    async fn users(
        &self,
        client: &Client,
        account: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let (users, failure) = client.list_users(account, cancel).await.into_parts();

        match self.cli.format {
            OutputFormat::Json => self.output(&json!(users)),
            OutputFormat::Pretty => {
                for user in &users {
                    println!("{}", format_user(user));
                }
                println!("{} user(s)", users.len());
            }
        }

        match failure {
            None => Ok(()),
            Some(e) => {
                warn!("Listing incomplete, {} user(s) collected", users.len());
                Err(e)
            }
        }
    }

    async fn purge(&self, client: &Client, zone: &str, cancel: &CancellationToken) -> Result<()> {
        client.purge_cache(zone, cancel).await?;
        self.output(&json!({ "success": true, "zone": zone }));
        Ok(())
    }

    /// Output a JSON value
    fn output(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// One-line human-readable rendering of a user
fn format_user(user: &User) -> String {
    format!(
        "{}  {:<32}  {}  (created {})",
        user.id,
        user.name,
        user.email,
        user.created_at.format("%Y-%m-%d")
    )
}
