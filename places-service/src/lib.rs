//! Places provider access for the relay.
//!
//! Public API:
//! - [`search::search_places`]: text search, top-N cut, concurrent postal-code
//!   enrichment, assembly into [`models::SearchResult`]s.
//! - [`provider::PlacesProvider`]: the seam between the pipeline and a concrete
//!   provider; [`services::google_places_service::GooglePlacesService`] is the
//!   HTTP implementation.
//! - [`config`]: provider configuration loaded from environment variables.

pub mod config;
pub mod error_handler;
pub mod models;
pub mod postal_code;
pub mod provider;
pub mod search;
pub mod services;
pub mod telemetry;

pub use error_handler::{PlacesError, Result};
pub use models::SearchResult;
pub use provider::PlacesProvider;
pub use search::{MAX_RESULTS, search_places};
