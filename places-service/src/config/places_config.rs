use std::fmt;

/// Default base URL of the Google Places web service.
pub const DEFAULT_PLACES_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place";

/// Configuration for the places provider.
///
/// # Fields
///
/// - `endpoint`: Base URL; `/textsearch/json` and `/details/json` are appended.
/// - `api_key`: Provider credential, sent as the `key` query parameter.
/// - `max_results`: How many candidates are kept and enriched per query.
///
/// # Examples
///
/// ```
/// use places_service::config::PlacesConfig;
///
/// let cfg = PlacesConfig::new("my-key");
/// assert_eq!(cfg.max_results, 3);
/// ```
#[derive(Clone)]
pub struct PlacesConfig {
    /// Provider base URL (no trailing slash required).
    pub endpoint: String,

    /// Provider API key.
    pub api_key: String,

    /// Top-N cutoff applied to the text-search results.
    pub max_results: usize,
}

impl PlacesConfig {
    /// Config for the public Google endpoint with the default cutoff.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_PLACES_ENDPOINT.to_string(),
            api_key: api_key.into(),
            max_results: crate::search::MAX_RESULTS,
        }
    }

    /// Same config pointed at another base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

// The key never ends up in logs.
impl fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("max_results", &self.max_results)
            .finish()
    }
}
