//! Google Places web-service client.
//!
//! Endpoints are derived from [`PlacesConfig::endpoint`]:
//! - `GET {endpoint}/textsearch/json?query=..&key=..`
//! - `GET {endpoint}/details/json?place_id=..&fields=address_component&key=..`
//!
//! Google answers most failures with HTTP 200 and a non-`OK` `status` field;
//! both that and non-2xx HTTP statuses are mapped to [`PlacesError`].
//! No timeout and no retry are configured.

use futures::future::BoxFuture;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::{
    config::places_config::PlacesConfig,
    error_handler::{PlacesError, Result, make_snippet, validate_http_endpoint},
    models::{AddressComponent, CandidatePlace},
    provider::PlacesProvider,
};

/// Provider status meaning "call succeeded".
const STATUS_OK: &str = "OK";
/// Provider status meaning "call succeeded, nothing matched".
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Detail lookups only ask for what the enrichment needs.
const DETAILS_FIELDS: &str = "address_component";

/// Thin client for the Google Places API.
///
/// Keeps one `reqwest::Client` for all calls made through it.
pub struct GooglePlacesService {
    client: reqwest::Client,
    cfg: PlacesConfig,
    url_text_search: String,
    url_details: String,
}

impl GooglePlacesService {
    /// Creates a new [`GooglePlacesService`] from the given config.
    ///
    /// # Errors
    /// - [`PlacesError::Config`] if the endpoint is not an http(s) URL
    /// - [`PlacesError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: PlacesConfig) -> Result<Self> {
        let endpoint = cfg.endpoint.trim();
        validate_http_endpoint("PLACES_API_URL", endpoint)?;

        let client = reqwest::Client::builder().gzip(true).build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_text_search = format!("{base}/textsearch/json");
        let url_details = format!("{base}/details/json");

        info!(
            endpoint = %base,
            max_results = cfg.max_results,
            "GooglePlacesService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_text_search,
            url_details,
        })
    }

    /// Text search; `ZERO_RESULTS` is an empty list, any other non-`OK` status an error.
    ///
    /// # Errors
    /// - [`PlacesError::HttpStatus`] for non-2xx responses
    /// - [`PlacesError::ProviderStatus`] for a failing provider status
    /// - [`PlacesError::HttpTransport`] / [`PlacesError::Decode`] otherwise
    #[instrument(skip_all, fields(query = %query))]
    pub async fn fetch_text_search(&self, query: &str) -> Result<Vec<CandidatePlace>> {
        let out: TextSearchResponse = self
            .get_json(
                &self.url_text_search,
                &[("query", query), ("key", self.cfg.api_key.as_str())],
            )
            .await?;

        check_status(&out.status, out.error_message)?;
        debug!(candidates = out.results.len(), status = %out.status, "text search done");
        Ok(out.results)
    }

    /// Detail lookup returning the place's address components.
    ///
    /// # Errors
    /// Same as [`GooglePlacesService::fetch_text_search`]; `ZERO_RESULTS`
    /// yields an empty component list.
    #[instrument(skip_all, fields(place_id = %place_id))]
    pub async fn fetch_address_components(&self, place_id: &str) -> Result<Vec<AddressComponent>> {
        let out: DetailsResponse = self
            .get_json(
                &self.url_details,
                &[
                    ("place_id", place_id),
                    ("fields", DETAILS_FIELDS),
                    ("key", self.cfg.api_key.as_str()),
                ],
            )
            .await?;

        check_status(&out.status, out.error_message)?;
        Ok(out
            .result
            .map(|r| r.address_components)
            .unwrap_or_default())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, params: &[(&str, &str)]) -> Result<T> {
        // The query string carries the key: never log it, and strip it from
        // transport errors.
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PlacesError::HttpStatus {
                status,
                url: url.to_string(),
                snippet: make_snippet(&text),
            });
        }

        let bytes = resp.bytes().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            PlacesError::Decode(format!(
                "serde error: {e}; body starts with `{}`",
                make_snippet(&String::from_utf8_lossy(&bytes))
            ))
        })
    }
}

impl PlacesProvider for GooglePlacesService {
    fn text_search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<CandidatePlace>>> {
        Box::pin(self.fetch_text_search(query))
    }

    fn address_components<'a>(
        &'a self,
        place_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<AddressComponent>>> {
        Box::pin(self.fetch_address_components(place_id))
    }
}

fn check_status(status: &str, error_message: Option<String>) -> Result<()> {
    match status {
        STATUS_OK | STATUS_ZERO_RESULTS => Ok(()),
        other => Err(PlacesError::ProviderStatus {
            status: other.to_string(),
            message: error_message.filter(|m| !m.trim().is_empty()),
        }),
    }
}

/// Response body of `/textsearch/json`.
#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<CandidatePlace>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Response body of `/details/json`.
#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<DetailsResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}
