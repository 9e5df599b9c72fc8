//! Cloudflare API client
//!
//! Two operations are supported:
//!
//! - listing every Zero Trust user of an account (`list_users` / `users`)
//! - purging a zone's cache (`purge_cache`)
//!
//! Account and zone identifiers are passed per call; the token and API root
//! are fixed when the client is built. Nothing is retried.

use crate::auth::BearerToken;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{build_request, ReqwestTransport, Transport};
use crate::pagination::{collect_pages, Collected, Page, PageCount};
use crate::types::{User, UsersPage};
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};
use url::Url;

/// Client for the Cloudflare v4 API
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base_url: String,
    token: BearerToken,
    page_count: PageCount,
}

impl Client {
    /// Create a client using the default reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_config(&config.transport)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client sending requests through `transport`
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: config.base_url,
            token: config.token,
            page_count: config.page_count,
        }
    }

    /// API root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Page-count strategy used by `list_users`
    pub fn page_count(&self) -> PageCount {
        self.page_count
    }

    /// List every Zero Trust user of an account, handling pagination
    ///
    /// The result may be partial: when a page fails, the records fetched so
    /// far are returned together with the failure. Only page 1's records
    /// have a guaranteed position (first).
    ///
    /// API Reference: <https://developers.cloudflare.com/api/operations/zero-trust-users-get-users>
    #[instrument(skip(self, cancel))]
    pub async fn list_users(
        &self,
        account_id: &str,
        cancel: &CancellationToken,
    ) -> Collected<User> {
        let client = self.clone();
        let account_id = account_id.to_string();

        let collected = collect_pages(
            move |page, cancel| {
                let client = client.clone();
                let account_id = account_id.clone();
                async move {
                    client
                        .fetch_users_page(&account_id, page, &cancel)
                        .await
                        .map(Page::from)
                }
            },
            self.page_count,
            cancel,
        )
        .await;

        info!(
            records = collected.len(),
            complete = collected.is_complete(),
            "Listed users"
        );
        collected
    }

    /// List every Zero Trust user, discarding partial results on failure
    pub async fn users(
        &self,
        account_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>> {
        self.list_users(account_id, cancel).await.into_result()
    }

    /// Join path segments onto the API root, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::create_request(format!("{e}: {}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| Error::create_request(format!("not a base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetch a single page of the user listing
    ///
    /// The HTTP status is not inspected; an error body fails to decode.
    pub async fn fetch_users_page(
        &self,
        account_id: &str,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<UsersPage> {
        if account_id.is_empty() {
            return Err(Error::create_request("account id is empty"));
        }

        let url = self.endpoint(&["accounts", account_id, "access", "users"])?;
        let request = build_request(
            Method::GET,
            url.as_str(),
            &self.token,
            &[("page", page.to_string())],
            cancel,
        )?;

        debug!(page, "Fetching users page");
        let response = self
            .transport
            .send(request, cancel)
            .await
            .map_err(Error::send)?;

        let data: UsersPage = response.json()?;
        debug!(
            page,
            count = data.result_info.count,
            total_count = data.result_info.total_count,
            "Fetched users page"
        );
        Ok(data)
    }

    /// Purge everything cached for a zone
    ///
    /// Succeeds only on HTTP 200.
    #[instrument(skip(self, cancel))]
    pub async fn purge_cache(&self, zone_id: &str, cancel: &CancellationToken) -> Result<()> {
        if zone_id.is_empty() {
            return Err(Error::create_request("zone id is empty"));
        }

        let url = self.endpoint(&["zones", zone_id, "purge_cache"])?;
        let request = build_request(Method::POST, url.as_str(), &self.token, &[], cancel)?;

        let response = self
            .transport
            .send(request, cancel)
            .await
            .map_err(Error::send)?;

        if response.status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                status: response.status.as_u16(),
            });
        }

        info!("Purged zone cache");
        Ok(())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .field("page_count", &self.page_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
