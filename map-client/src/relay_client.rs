//! HTTP client for the relay's `GET /api/search`.

use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error_handler::{ClientError, GENERIC_SEARCH_FAILURE};
use crate::models::LocationResult;

/// Where the controller gets results from.
pub trait SearchBackend: Send + Sync {
    fn search<'a>(&'a self, query: &'a str)
    -> BoxFuture<'a, Result<Vec<LocationResult>, ClientError>>;
}

/// Thin client around the relay endpoint.
pub struct RelayClient {
    client: reqwest::Client,
    url_search: String,
}

impl RelayClient {
    /// # Errors
    /// [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().build()?;
        let url_search = format!("{}/api/search", base_url.trim_end_matches('/'));
        Ok(Self { client, url_search })
    }

    /// Calls the relay and decodes `{ results }`, or turns `{ error }` into
    /// [`ClientError::Relay`].
    #[instrument(skip_all, fields(query = %query))]
    pub async fn fetch_search(&self, query: &str) -> Result<Vec<LocationResult>, ClientError> {
        debug!("GET {}", self.url_search);
        let resp = self
            .client
            .get(&self.url_search)
            .query(&[("query", query)])
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        debug!(%status, len = bytes.len(), "relay answered");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_SEARCH_FAILURE.to_string());
            return Err(ClientError::Relay { status, message });
        }

        serde_json::from_slice::<SearchBody>(&bytes)
            .map(|b| b.results)
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl SearchBackend for RelayClient {
    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<LocationResult>, ClientError>> {
        Box::pin(self.fetch_search(query))
    }
}

#[derive(Deserialize)]
struct SearchBody {
    results: Vec<LocationResult>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}
