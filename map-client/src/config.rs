//! Client settings from environment variables.
//!
//! - `RELAY_BASE_URL` = relay origin (optional, defaults to `http://localhost:3001`)
//! - `MAP_API_KEY`    = credential forwarded to the map loader (optional)

use crate::error_handler::ClientError;
use crate::map::MapOptions;
use crate::models::LatLng;

pub const DEFAULT_RELAY_BASE_URL: &str = "http://localhost:3001";

/// Map center before any search (New York City).
pub const DEFAULT_CENTER: LatLng = LatLng::new(40.7128, -74.0060);
/// Map zoom before any search.
pub const DEFAULT_ZOOM: u8 = 10;
/// Zoom applied when a result is selected.
pub const SELECTED_ZOOM: u8 = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub relay_base_url: String,
    pub map_api_key: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let relay_base_url = lookup("RELAY_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_RELAY_BASE_URL.to_string());

        if !(relay_base_url.starts_with("http://") || relay_base_url.starts_with("https://")) {
            return Err(ClientError::Config {
                var: "RELAY_BASE_URL",
                reason: "must start with http:// or https://",
            });
        }

        let map_api_key = lookup("MAP_API_KEY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            relay_base_url,
            map_api_key,
        })
    }

    /// Initial map options: default center and zoom, plus the map key.
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            api_key: self.map_api_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.relay_base_url, "http://localhost:3001");
        assert_eq!(cfg.map_api_key, None);

        let opts = cfg.map_options();
        assert_eq!(opts.center, LatLng::new(40.7128, -74.0060));
        assert_eq!(opts.zoom, 10);
    }

    #[test]
    fn relay_url_must_be_http() {
        let err = ClientConfig::from_lookup(|k| {
            (k == "RELAY_BASE_URL").then(|| "localhost:3001".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::Config { var: "RELAY_BASE_URL", .. }));
    }
}
