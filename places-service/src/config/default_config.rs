//! Provider config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `GOOGLE_MAPS_API_KEY` = provider credential (mandatory)
//! - `PLACES_API_URL`      = provider base URL (optional, defaults to the public Google endpoint)
//! - `PLACES_MAX_RESULTS`  = top-N cutoff (optional, `1..=3`, defaults to 3)

use crate::{
    config::places_config::{DEFAULT_PLACES_ENDPOINT, PlacesConfig},
    error_handler::{ConfigError, Result, env_value, parse_opt, require, validate_http_endpoint},
    search::MAX_RESULTS,
};

/// Constructs the provider config from the process environment.
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if `GOOGLE_MAPS_API_KEY` is missing
/// - [`ConfigError::InvalidFormat`] if `PLACES_API_URL` is not an http(s) URL
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::OutOfRange`] for a bad `PLACES_MAX_RESULTS`
pub fn config_google_places() -> Result<PlacesConfig> {
    config_google_places_with(env_value)
}

/// Same as [`config_google_places`], reading values through `lookup`.
pub fn config_google_places_with<F>(lookup: F) -> Result<PlacesConfig>
where
    F: Fn(&'static str) -> Option<String>,
{
    let api_key = require("GOOGLE_MAPS_API_KEY", lookup("GOOGLE_MAPS_API_KEY"))?;

    let endpoint = lookup("PLACES_API_URL")
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_PLACES_ENDPOINT.to_string());
    validate_http_endpoint("PLACES_API_URL", &endpoint)?;

    let max_results = parse_opt::<usize>(
        "PLACES_MAX_RESULTS",
        lookup("PLACES_MAX_RESULTS"),
        "expected usize",
    )?
    .unwrap_or(MAX_RESULTS);
    if !(1..=MAX_RESULTS).contains(&max_results) {
        return Err(ConfigError::OutOfRange {
            field: "PLACES_MAX_RESULTS",
            detail: "expected 1..=3",
        }
        .into());
    }

    Ok(PlacesConfig {
        endpoint,
        api_key,
        max_results,
    })
}
