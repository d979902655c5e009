//! Errors of the client side.
//!
//! [`ClientError`] covers the call to the relay and ends up, via `Display`,
//! as the message shown to the user. [`MapInitError`] is only ever logged.

use reqwest::StatusCode;
use thiserror::Error;

/// Fallback message when the relay fails without saying why.
pub const GENERIC_SEARCH_FAILURE: &str = "Search failed";

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client configuration is unusable.
    #[error("invalid client configuration in {var}: {reason}")]
    Config {
        var: &'static str,
        reason: &'static str,
    },

    /// The relay could not be reached or the body could not be read.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-2xx status; `message` is its `error` field.
    #[error("{message}")]
    Relay { status: StatusCode, message: String },

    /// 2xx response whose body is not the expected shape.
    #[error("Malformed response from relay: {0}")]
    Decode(String),
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MapInitError {
    /// The mapping capability could not be loaded (script, key, network...).
    #[error("failed to load map: {0}")]
    Load(String),
}
