//! Provider-side place records and the normalized result handed to clients.

use serde::{Deserialize, Serialize};

/// A single place record as returned by the provider's text search.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePlace {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
    pub geometry: Geometry,
    /// Usually absent from text search; filled by the detail lookup.
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One typed piece of a structured address (street number, locality, postal code...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Normalized, client-facing search result.
///
/// `postal_code` is an empty string when the provider had none or the
/// detail lookup failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub postal_code: String,
}

impl SearchResult {
    /// Builds the client-facing shape from an (enriched) candidate.
    ///
    /// Coordinates are copied as-is; rounding is a display concern.
    pub fn from_candidate(candidate: CandidatePlace, postal_code: String) -> Self {
        Self {
            place_id: candidate.place_id,
            name: candidate.name,
            formatted_address: candidate.formatted_address,
            latitude: candidate.geometry.location.lat,
            longitude: candidate.geometry.location.lng,
            postal_code,
        }
    }
}
