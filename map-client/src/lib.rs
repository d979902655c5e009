//! Client side of the places relay.
//!
//! [`controller::SearchController`] owns the search state, the map widget and
//! its markers. It talks to the relay through [`relay_client::SearchBackend`]
//! and to the map through [`map::MapWidget`]; hosts render
//! [`view::render`] output and forward clicks back to the controller.

pub mod config;
pub mod controller;
pub mod error_handler;
pub mod map;
pub mod models;
pub mod relay_client;
pub mod state;
pub mod view;

pub use controller::SearchController;
pub use error_handler::{ClientError, MapInitError};
pub use models::{LatLng, LocationResult};
pub use state::SearchState;
