//! Shared fixtures for handler tests: a scripted provider and a relay bound
//! to an ephemeral local port.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use places_service::{
    MAX_RESULTS, PlacesError, PlacesProvider, Result,
    models::{AddressComponent, CandidatePlace, Geometry, LatLng},
};

use crate::{AppState, CorsPolicy, router};

#[derive(Default)]
pub struct StubProvider {
    candidates: Vec<CandidatePlace>,
    search_status: Option<&'static str>,
    postal_codes: HashMap<String, String>,
    failing_lookups: Vec<String>,
    last_query: Mutex<Option<String>>,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(candidates: Vec<CandidatePlace>) -> Arc<Self> {
        Arc::new(Self {
            candidates,
            ..Default::default()
        })
    }

    pub fn failing_search(status: &'static str) -> Arc<Self> {
        Arc::new(Self {
            search_status: Some(status),
            ..Default::default()
        })
    }

    pub fn with_postal_code(self: Arc<Self>, place_id: &str, code: &str) -> Arc<Self> {
        let mut this = Arc::into_inner(self).expect("configure before sharing");
        this.postal_codes.insert(place_id.into(), code.into());
        Arc::new(this)
    }

    pub fn with_failing_lookup(self: Arc<Self>, place_id: &str) -> Arc<Self> {
        let mut this = Arc::into_inner(self).expect("configure before sharing");
        this.failing_lookups.push(place_id.into());
        Arc::new(this)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

impl PlacesProvider for StubProvider {
    fn text_search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<CandidatePlace>>> {
        Box::pin(async move {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.to_string());
            match self.search_status {
                Some(status) => Err(PlacesError::ProviderStatus {
                    status: status.into(),
                    message: None,
                }),
                None => Ok(self.candidates.clone()),
            }
        })
    }

    fn address_components<'a>(
        &'a self,
        place_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<AddressComponent>>> {
        Box::pin(async move {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_lookups.iter().any(|f| f == place_id) {
                return Err(PlacesError::Decode("scripted lookup failure".into()));
            }
            Ok(self
                .postal_codes
                .get(place_id)
                .map(|code| {
                    vec![AddressComponent {
                        long_name: code.clone(),
                        short_name: code.clone(),
                        types: vec!["postal_code".into()],
                    }]
                })
                .unwrap_or_default())
        })
    }
}

pub fn candidate(id: &str, name: &str, lat: f64, lng: f64) -> CandidatePlace {
    CandidatePlace {
        place_id: id.into(),
        name: name.into(),
        formatted_address: format!("{name} address"),
        geometry: Geometry {
            location: LatLng { lat, lng },
        },
        address_components: Vec::new(),
    }
}

/// Serves the relay router on `127.0.0.1:0`; returns its base URL.
pub async fn spawn_relay(provider: Arc<StubProvider>, cors: CorsPolicy) -> String {
    let state = Arc::new(AppState::new(provider, MAX_RESULTS, cors));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{addr}")
}
