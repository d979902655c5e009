use serde::{Deserialize, Serialize};

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One search result as delivered by the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Empty when the relay could not determine one.
    #[serde(default)]
    pub postal_code: String,
}

impl LocationResult {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}
