//! Search & map controller.
//!
//! Owns the [`SearchState`], the map widget (if it loaded) and the markers
//! placed on it. A search is split into [`SearchController::begin_search`]
//! and [`SearchController::complete_search`] so an event loop can keep
//! accepting input while a call is in flight; only the latest submission is
//! allowed to land.

use tracing::{debug, error, info, warn};

use crate::config::SELECTED_ZOOM;
use crate::error_handler::ClientError;
use crate::map::{LatLngBounds, MapLoader, MapOptions, MapWidget, MarkerId, MarkerOptions};
use crate::models::LocationResult;
use crate::relay_client::SearchBackend;
use crate::state::SearchState;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query";

/// Handle for one submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

pub struct SearchController {
    options: MapOptions,
    state: SearchState,
    map: Option<Box<dyn MapWidget>>,
    mount_attempted: bool,
    /// Placed markers and the result each one stands for.
    markers: Vec<(MarkerId, String)>,
    latest_seq: u64,
}

impl SearchController {
    pub fn new(options: MapOptions) -> Self {
        Self {
            options,
            state: SearchState::Idle,
            map: None,
            mount_attempted: false,
            markers: Vec::new(),
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Loads the map once. Later calls are ignored. A failure is logged and
    /// leaves the controller usable without a map.
    pub async fn mount(&mut self, loader: &dyn MapLoader) {
        if self.mount_attempted {
            debug!("map already mounted");
            return;
        }
        self.mount_attempted = true;

        let loaded = loader.load(&self.options).await;
        match loaded {
            Ok(mut map) => {
                info!(zoom = self.options.zoom, "map ready");
                if let SearchState::Displayed { results, .. } = &self.state {
                    self.markers = place_markers(map.as_mut(), results);
                }
                self.map = Some(map);
            }
            Err(e) => error!("Error loading map: {e}"),
        }
    }

    /// Starts a search. Blank input moves straight to `Errored` and returns
    /// `None`. Otherwise results, selection, error and markers are cleared
    /// before the ticket is handed out. Either way, tickets issued earlier
    /// become stale.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        self.latest_seq += 1;
        if query.is_empty() {
            self.clear_markers();
            self.state = SearchState::Errored {
                message: EMPTY_QUERY_MESSAGE.to_string(),
            };
            return None;
        }

        self.clear_markers();
        self.state = SearchState::Searching {
            query: query.to_string(),
        };
        debug!(seq = self.latest_seq, query, "search started");

        Some(SearchTicket {
            seq: self.latest_seq,
            query: query.to_string(),
        })
    }

    /// Applies the outcome of a search. Returns `false` (and changes nothing)
    /// when a newer search has been started since `ticket` was issued.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<LocationResult>, ClientError>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale search result"
            );
            return false;
        }

        self.clear_markers();
        self.state = match outcome {
            Ok(results) => {
                info!(query = %ticket.query, count = results.len(), "search finished");
                SearchState::from_results(results)
            }
            Err(e) => {
                error!(query = %ticket.query, "Error searching places: {e}");
                SearchState::Errored {
                    message: e.to_string(),
                }
            }
        };

        if let (Some(map), SearchState::Displayed { results, .. }) =
            (self.map.as_mut(), &self.state)
        {
            self.markers = place_markers(map.as_mut(), results);
        }
        true
    }

    /// Begin, call the backend, complete.
    pub async fn submit(&mut self, backend: &dyn SearchBackend, query: &str) {
        let Some(ticket) = self.begin_search(query) else {
            return;
        };
        let outcome = backend.search(ticket.query()).await;
        self.complete_search(ticket, outcome);
    }

    /// Selects the result with `place_id`, recenters and zooms in on it.
    /// Returns `false` if no current result has that id.
    pub fn select_result(&mut self, place_id: &str) -> bool {
        let SearchState::Displayed { results, selected } = &mut self.state else {
            return false;
        };
        let Some(index) = results.iter().position(|r| r.place_id == place_id) else {
            warn!(place_id, "selection of unknown result ignored");
            return false;
        };

        *selected = Some(index);
        let center = results[index].position();
        if let Some(map) = self.map.as_mut() {
            map.set_center(center);
            map.set_zoom(SELECTED_ZOOM);
        }
        true
    }

    /// Click callback for markers placed by this controller.
    pub fn on_marker_click(&mut self, id: MarkerId) -> bool {
        let Some(place_id) = self
            .markers
            .iter()
            .find(|(m, _)| *m == id)
            .map(|(_, p)| p.clone())
        else {
            debug!(?id, "click on unknown marker");
            return false;
        };
        self.select_result(&place_id)
    }

    fn clear_markers(&mut self) {
        for (id, _) in self.markers.drain(..) {
            if let Some(map) = self.map.as_mut() {
                map.remove_marker(id);
            }
        }
    }
}

/// One marker per result, labelled by rank, then fit the viewport to them.
fn place_markers(map: &mut dyn MapWidget, results: &[LocationResult]) -> Vec<(MarkerId, String)> {
    let markers: Vec<_> = results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let id = map.add_marker(MarkerOptions {
                position: r.position(),
                title: r.name.clone(),
                label: (i + 1).to_string(),
            });
            (id, r.place_id.clone())
        })
        .collect();

    if let Some(bounds) = LatLngBounds::from_points(results.iter().map(LocationResult::position)) {
        map.fit_bounds(bounds);
    }
    markers
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::future::{BoxFuture, LocalBoxFuture};
    use reqwest::StatusCode;

    use super::*;
    use crate::config::{DEFAULT_CENTER, DEFAULT_ZOOM};
    use crate::error_handler::MapInitError;
    use crate::models::LatLng;
    use crate::view;

    #[derive(Default)]
    struct MapLog {
        live: Vec<(MarkerId, MarkerOptions)>,
        removed: usize,
        bounds: Vec<LatLngBounds>,
        center: Option<LatLng>,
        zoom: Option<u8>,
        next_id: u64,
    }

    struct FakeMap(Rc<RefCell<MapLog>>);

    impl MapWidget for FakeMap {
        fn add_marker(&mut self, marker: MarkerOptions) -> MarkerId {
            let mut log = self.0.borrow_mut();
            log.next_id += 1;
            let id = MarkerId(log.next_id);
            log.live.push((id, marker));
            id
        }

        fn remove_marker(&mut self, id: MarkerId) {
            let mut log = self.0.borrow_mut();
            log.live.retain(|(m, _)| *m != id);
            log.removed += 1;
        }

        fn fit_bounds(&mut self, bounds: LatLngBounds) {
            self.0.borrow_mut().bounds.push(bounds);
        }

        fn set_center(&mut self, center: LatLng) {
            self.0.borrow_mut().center = Some(center);
        }

        fn set_zoom(&mut self, zoom: u8) {
            self.0.borrow_mut().zoom = Some(zoom);
        }
    }

    struct FakeLoader {
        log: Rc<RefCell<MapLog>>,
        fail: bool,
        loads: RefCell<usize>,
    }

    impl FakeLoader {
        fn new() -> Self {
            Self {
                log: Rc::default(),
                fail: false,
                loads: RefCell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }
    }

    impl MapLoader for FakeLoader {
        fn load<'a>(
            &'a self,
            options: &'a MapOptions,
        ) -> LocalBoxFuture<'a, Result<Box<dyn MapWidget>, MapInitError>> {
            Box::pin(async move {
                *self.loads.borrow_mut() += 1;
                if self.fail {
                    return Err(MapInitError::Load("script blocked".into()));
                }
                let mut log = self.log.borrow_mut();
                log.center = Some(options.center);
                log.zoom = Some(options.zoom);
                drop(log);
                Ok(Box::new(FakeMap(self.log.clone())) as Box<dyn MapWidget>)
            })
        }
    }

    #[derive(Default)]
    struct StubBackend {
        results: HashMap<String, Vec<LocationResult>>,
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn with(mut self, query: &str, results: Vec<LocationResult>) -> Self {
            self.results.insert(query.to_string(), results);
            self
        }
    }

    impl SearchBackend for StubBackend {
        fn search<'a>(
            &'a self,
            query: &'a str,
        ) -> BoxFuture<'a, Result<Vec<LocationResult>, ClientError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let found = self.results.get(query).cloned();
            Box::pin(async move {
                found.ok_or_else(|| ClientError::Relay {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Places provider error: REQUEST_DENIED".into(),
                })
            })
        }
    }

    fn place(id: &str, lat: f64, lng: f64) -> LocationResult {
        LocationResult {
            place_id: id.to_string(),
            name: format!("Place {id}"),
            formatted_address: format!("{id} street"),
            latitude: lat,
            longitude: lng,
            postal_code: String::new(),
        }
    }

    fn three_places() -> Vec<LocationResult> {
        vec![
            place("a", 48.8584, 2.2945),
            place("b", 40.6892, -74.0445),
            place("c", 51.5007, -0.1246),
        ]
    }

    fn options() -> MapOptions {
        MapOptions {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            api_key: None,
        }
    }

    async fn mounted(loader: &FakeLoader) -> SearchController {
        let mut controller = SearchController::new(options());
        controller.mount(loader).await;
        controller
    }

    #[tokio::test]
    async fn mount_uses_default_view_and_runs_once() {
        let loader = FakeLoader::new();
        let mut controller = mounted(&loader).await;
        controller.mount(&loader).await;

        assert!(controller.has_map());
        assert_eq!(*loader.loads.borrow(), 1);
        let log = loader.log.borrow();
        assert_eq!(log.center, Some(LatLng::new(40.7128, -74.0060)));
        assert_eq!(log.zoom, Some(10));
    }

    #[tokio::test]
    async fn results_place_ranked_markers_and_fit_bounds() {
        let loader = FakeLoader::new();
        let mut controller = mounted(&loader).await;
        let backend = StubBackend::default().with("landmarks", three_places());

        controller.submit(&backend, "landmarks").await;

        assert_eq!(controller.state().results().len(), 3);
        assert_eq!(controller.state().selected(), None);
        let log = loader.log.borrow();
        let labels: Vec<_> = log.live.iter().map(|(_, m)| m.label.as_str()).collect();
        assert_eq!(labels, ["1", "2", "3"]);
        assert_eq!(log.live[1].1.title, "Place b");

        let bounds = log.bounds.last().unwrap();
        assert!(three_places().iter().all(|r| bounds.contains(r.position())));
    }

    #[tokio::test]
    async fn zero_results_then_new_query_clears_empty_before_resolving() {
        let loader = FakeLoader::new();
        let mut controller = mounted(&loader).await;
        let backend = StubBackend::default()
            .with("nowhere", vec![])
            .with("landmarks", three_places());

        controller.submit(&backend, "nowhere").await;
        assert_eq!(controller.state(), &SearchState::Empty);
        assert_eq!(controller.marker_count(), 0);
        assert!(loader.log.borrow().live.is_empty());

        let ticket = controller.begin_search("landmarks").unwrap();
        assert_eq!(
            controller.state(),
            &SearchState::Searching {
                query: "landmarks".into()
            }
        );

        let outcome = backend.search(ticket.query()).await;
        assert!(controller.complete_search(ticket, outcome));
        assert_eq!(controller.state().results().len(), 3);
    }

    #[tokio::test]
    async fn selecting_second_result_recenters_and_marks_only_it() {
        let loader = FakeLoader::new();
        let mut controller = mounted(&loader).await;
        let backend = StubBackend::default().with("landmarks", three_places());
        controller.submit(&backend, "landmarks").await;

        assert!(controller.select_result("b"));

        {
            let log = loader.log.borrow();
            assert_eq!(log.center, Some(LatLng::new(40.6892, -74.0445)));
            assert_eq!(log.zoom, Some(SELECTED_ZOOM));
        }
        let selected: Vec<_> = view::render(controller.state())
            .items
            .iter()
            .filter(|i| i.selected)
            .map(|i| i.place_id.clone())
            .collect();
        assert_eq!(selected, ["b"]);

        // Idempotent.
        assert!(controller.select_result("b"));
        assert_eq!(controller.state().selected().unwrap().place_id, "b");
    }

    #[tokio::test]
    async fn marker_click_selects_its_result() {
        let loader = FakeLoader::new();
        let mut controller = mounted(&loader).await;
        let backend = StubBackend::default().with("landmarks", three_places());
        controller.submit(&backend, "landmarks").await;

        let third = loader.log.borrow().live[2].0;
        assert!(controller.on_marker_click(third));
        assert_eq!(controller.state().selected().unwrap().place_id, "c");

        assert!(!controller.on_marker_click(MarkerId(999)));
        assert!(!controller.select_result("missing"));
    }

    #[tokio::test]
    async fn new_search_replaces_all_markers_and_clears_selection() {
        let loader = FakeLoader::new();
        let mut controller = mounted(&loader).await;
        let backend = StubBackend::default()
            .with("landmarks", three_places())
            .with("paris", vec![place("p", 48.8566, 2.3522)]);
        controller.submit(&backend, "landmarks").await;
        controller.select_result("a");

        let ticket = controller.begin_search("paris").unwrap();
        assert!(loader.log.borrow().live.is_empty());
        assert_eq!(controller.state().selected(), None);

        let outcome = backend.search(ticket.query()).await;
        controller.complete_search(ticket, outcome);

        let log = loader.log.borrow();
        assert_eq!(log.removed, 3);
        assert_eq!(log.live.len(), 1);
        assert_eq!(log.live[0].1.label, "1");
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let loader = FakeLoader::new();
        let mut controller = mounted(&loader).await;
        let backend = StubBackend::default()
            .with("first", vec![place("f", 1.0, 1.0)])
            .with("second", three_places());

        let first = controller.begin_search("first").unwrap();
        let second = controller.begin_search("second").unwrap();

        let late = backend.search(first.query()).await;
        assert!(!controller.complete_search(first, late));
        assert!(controller.state().is_searching());
        assert!(loader.log.borrow().live.is_empty());

        let outcome = backend.search(second.query()).await;
        assert!(controller.complete_search(second, outcome));
        assert_eq!(controller.marker_count(), 3);
    }

    #[tokio::test]
    async fn blank_submission_supersedes_a_search_in_flight() {
        let loader = FakeLoader::new();
        let mut controller = mounted(&loader).await;
        let backend = StubBackend::default().with("landmarks", three_places());

        let in_flight = controller.begin_search("landmarks").unwrap();
        controller.submit(&backend, "   ").await;

        let late = backend.search(in_flight.query()).await;
        assert!(!controller.complete_search(in_flight, late));
        assert_eq!(controller.state().error(), Some(EMPTY_QUERY_MESSAGE));
        assert_eq!(controller.marker_count(), 0);
        assert!(loader.log.borrow().live.is_empty());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_query_errors_without_a_call() {
        let mut controller = SearchController::new(options());
        let backend = StubBackend::default();

        controller.submit(&backend, "   ").await;

        assert_eq!(controller.state().error(), Some(EMPTY_QUERY_MESSAGE));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn relay_failure_shows_its_message() {
        let loader = FakeLoader::new();
        let mut controller = mounted(&loader).await;
        let backend = StubBackend::default();

        controller.submit(&backend, "denied").await;

        assert_eq!(
            controller.state().error(),
            Some("Places provider error: REQUEST_DENIED")
        );
        assert_eq!(controller.marker_count(), 0);
    }

    #[tokio::test]
    async fn search_works_when_the_map_fails_to_load() {
        let loader = FakeLoader::failing();
        let mut controller = mounted(&loader).await;
        let backend = StubBackend::default().with("landmarks", three_places());

        controller.submit(&backend, "landmarks").await;

        assert!(!controller.has_map());
        assert_eq!(controller.state().results().len(), 3);
        assert_eq!(controller.marker_count(), 0);
        assert!(controller.select_result("a"));
    }

    #[tokio::test]
    async fn map_mounted_after_results_gets_markers() {
        let loader = FakeLoader::new();
        let mut controller = SearchController::new(options());
        let backend = StubBackend::default().with("landmarks", three_places());
        controller.submit(&backend, "landmarks").await;
        assert_eq!(controller.marker_count(), 0);

        controller.mount(&loader).await;

        assert_eq!(controller.marker_count(), 3);
        assert_eq!(loader.log.borrow().live.len(), 3);
    }
}
