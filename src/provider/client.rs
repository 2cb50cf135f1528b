//! Provider API client
//!
//! Read-only access to the webhook provider's HTTP API. The [`ProviderClient`]
//! trait is the seam the orchestrator works against; [`HttpProviderClient`]
//! is the production implementation over `reqwest`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, ProviderError, Result};
use crate::provider::types::{Connection, EventRecord, Page, RequestRecord};

/// Default API base for Hookdeck-compatible providers
pub const DEFAULT_API_BASE: &str = "https://api.hookdeck.com/2025-01-01";

/// Read-only provider API operations
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// List all connections for the authenticated project
    async fn list_connections(&self) -> Result<Vec<Connection>>;

    /// List one page of requests received by a source
    async fn list_requests(
        &self,
        source_id: &str,
        cursor: Option<&str>,
    ) -> Result<Page<RequestRecord>>;

    /// Fetch the full detail (including payload) of one request
    async fn retrieve_request(&self, id: &str) -> Result<RequestRecord>;

    /// List one page of events delivered to a destination
    async fn list_events(
        &self,
        destination_id: &str,
        cursor: Option<&str>,
    ) -> Result<Page<EventRecord>>;

    /// Fetch the full detail (including payload) of one event
    async fn retrieve_event(&self, id: &str) -> Result<EventRecord>;
}

/// HTTP implementation of [`ProviderClient`]
pub struct HttpProviderClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl HttpProviderClient {
    /// Create a client against the given API base URL
    pub fn new<S: Into<String>>(base_url: &str, api_key: S) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ProviderError::Transport(format!("invalid API base URL: {}", e)))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Create a client against [`DEFAULT_API_BASE`]
    pub fn with_default_base<S: Into<String>>(api_key: S) -> Result<Self> {
        Self::new(DEFAULT_API_BASE, api_key)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Transport("API base URL cannot be a base".to_string()))?
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ProviderError::Http {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(response.json::<T>().await?)
    }

    /// GET with a single retry on transient failure.
    ///
    /// Detail fetches are retried at most once; anything still failing
    /// surfaces to the caller.
    async fn get_json_with_retry<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T> {
        match self.get_json(url.clone(), query).await {
            Ok(value) => Ok(value),
            Err(err) if is_transient(&err) => {
                tracing::warn!(url = %url, error = %err, "Transient detail fetch failure, retrying once");
                self.get_json(url, query).await
            }
            Err(err) => Err(err),
        }
    }
}

fn is_transient(err: &Error) -> bool {
    match err {
        Error::Provider(ProviderError::Transport(_)) => true,
        Error::Provider(ProviderError::Http { status, .. }) => {
            *status == 429 || *status >= 500
        }
        _ => false,
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn list_connections(&self) -> Result<Vec<Connection>> {
        let url = self.endpoint(&["connections"])?;
        let page: Page<Connection> = self.get_json(url, &[]).await?;
        Ok(page.models)
    }

    async fn list_requests(
        &self,
        source_id: &str,
        cursor: Option<&str>,
    ) -> Result<Page<RequestRecord>> {
        let url = self.endpoint(&["requests"])?;
        let mut query = vec![("source_id", source_id)];
        if let Some(cursor) = cursor {
            query.push(("next", cursor));
        }
        self.get_json(url, &query).await
    }

    async fn retrieve_request(&self, id: &str) -> Result<RequestRecord> {
        let url = self.endpoint(&["requests", id])?;
        self.get_json_with_retry(url, &[]).await
    }

    async fn list_events(
        &self,
        destination_id: &str,
        cursor: Option<&str>,
    ) -> Result<Page<EventRecord>> {
        let url = self.endpoint(&["events"])?;
        let mut query = vec![("destination_id", destination_id)];
        if let Some(cursor) = cursor {
            query.push(("next", cursor));
        }
        self.get_json(url, &query).await
    }

    async fn retrieve_event(&self, id: &str) -> Result<EventRecord> {
        let url = self.endpoint(&["events", id])?;
        self.get_json_with_retry(url, &[]).await
    }
}
