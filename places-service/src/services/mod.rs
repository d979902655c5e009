pub mod google_places_service;
