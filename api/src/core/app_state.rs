use std::sync::Arc;

use axum::http::HeaderValue;
use places_service::{
    PlacesProvider,
    error_handler::{Result, env_value, parse_opt},
};

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Places backend used for search and detail lookups.
    pub provider: Arc<dyn PlacesProvider>,
    /// Top-N cutoff applied to each search.
    pub max_results: usize,
    /// Which browser origins may read responses.
    pub cors: CorsPolicy,
}

impl AppState {
    pub fn new(provider: Arc<dyn PlacesProvider>, max_results: usize, cors: CorsPolicy) -> Self {
        Self {
            provider,
            max_results,
            cors,
        }
    }
}

/// Allowed origins for cross-origin reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// `Access-Control-Allow-Origin: *`
    AnyOrigin,
    /// Only the listed origins are echoed back.
    Origins(Vec<String>),
}

impl CorsPolicy {
    /// Parses a comma-separated origin list; unset, empty or `*` means any origin.
    pub fn parse(raw: Option<&str>) -> Self {
        let origins: Vec<String> = raw
            .unwrap_or_default()
            .split(',')
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            CorsPolicy::AnyOrigin
        } else {
            CorsPolicy::Origins(origins)
        }
    }

    /// Value for `Access-Control-Allow-Origin`, if the request origin is allowed.
    pub fn allow_origin(&self, origin: Option<&HeaderValue>) -> Option<HeaderValue> {
        match self {
            CorsPolicy::AnyOrigin => Some(HeaderValue::from_static("*")),
            CorsPolicy::Origins(allowed) => {
                let origin = origin?;
                let value = origin.to_str().ok()?;
                allowed
                    .iter()
                    .any(|a| a == value)
                    .then(|| origin.clone())
            }
        }
    }
}

/// Listener and CORS settings of the relay process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `host:port` to bind.
    pub address: String,
    pub cors: CorsPolicy,
}

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 3001;

    /// Load from environment variables.
    ///
    /// - `API_ADDRESS`: full `host:port`, wins over `HOST`/`PORT`
    /// - `HOST` (default `0.0.0.0`), `PORT` (default `3001`)
    /// - `ALLOWED_ORIGINS`: comma-separated origins, `*` or unset for any
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_value)
    }

    /// Same as [`ServerConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let address = match lookup("API_ADDRESS") {
            Some(address) => address.trim().to_string(),
            None => {
                let host = lookup("HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
                let port = parse_opt::<u16>("PORT", lookup("PORT"), "expected u16 (1..=65535)")?
                    .unwrap_or(Self::DEFAULT_PORT);
                format!("{}:{port}", host.trim())
            }
        };

        let cors = CorsPolicy::parse(lookup("ALLOWED_ORIGINS").as_deref());

        Ok(Self { address, cors })
    }
}
