//! Unified error handling for `places-service`.
//!
//! This module exposes a single top-level error type [`PlacesError`] for the whole
//! library and groups configuration problems in [`ConfigError`]. Small helpers
//! for reading/validating environment values are provided and return the
//! unified [`Result<T>`] alias.
//!
//! All messages include the prefix `[Places Service]` to simplify attribution in logs.

use std::str::FromStr;

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, PlacesError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `places-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Configuration/validation errors (startup only).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying HTTP transport error (connect, TLS, body read).
    #[error("[Places Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Provider answered with a non-2xx HTTP status.
    #[error("[Places Service] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL without the query string.
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// Provider answered 200 but reported a failure in its `status` field
    /// (`REQUEST_DENIED`, `OVER_QUERY_LIMIT`, ...).
    #[error("[Places Service] provider status {status}{}", detail_suffix(.message))]
    ProviderStatus {
        /// Provider status name.
        status: String,
        /// Optional `error_message` sent along with the status.
        message: Option<String>,
    },

    /// Response payload could not be decoded as expected.
    #[error("[Places Service] decode error: {0}")]
    Decode(String),
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[Places Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (ports, limits).
    #[error("[Places Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `PLACES_MAX_RESULTS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected usize`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Places Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `PLACES_API_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[Places Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `PLACES_MAX_RESULTS`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Reads an environment variable, treating unset and blank the same way.
pub fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Requires a non-empty value for `name`.
///
/// # Errors
/// Returns [`PlacesError::Config`] with [`ConfigError::MissingVar`] if the
/// value is absent or blank.
pub fn require(name: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// See [`require`].
pub fn must_env(name: &'static str) -> Result<String> {
    require(name, env_value(name))
}

/// Parses an optional number (`Ok(None)` if unset/blank).
///
/// # Errors
/// Returns [`PlacesError::Config`] with [`ConfigError::InvalidNumber`] if the
/// value is set but does not parse as `T`.
pub fn parse_opt<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    reason: &'static str,
) -> Result<Option<T>> {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().parse::<T>().map(Some).map_err(|_| {
            PlacesError::from(ConfigError::InvalidNumber { var: name, reason })
        }),
        _ => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`PlacesError::Config`] with [`ConfigError::InvalidFormat`] when
/// the string does not start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Trims a response body to a short single-line snippet for error messages.
pub fn make_snippet(body: &str) -> String {
    body.chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .take(240)
        .collect::<String>()
        .trim()
        .to_string()
}
