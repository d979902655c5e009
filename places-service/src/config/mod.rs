pub mod default_config;
pub mod places_config;

pub use default_config::{config_google_places, config_google_places_with};
pub use places_config::PlacesConfig;
