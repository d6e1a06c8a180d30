use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use model::{city, route::RouteResult, BoundingBox, Coordinate};
use route_finder::{
    panel::StatusLine,
    resolver::{ResolverState, NO_ROUTE_MESSAGE},
    surface::{
        FitOptions, MapSurface, MarkerSpec, PopupAction, SurfaceError,
        SurfaceProvider, ViewOptions, ROUTE_LAYER_ID,
    },
    widget::{RouteFinder, WidgetConfig, WidgetEvent},
    DirectionsService, GeocodingService, ServiceError,
};

#[derive(Default)]
struct SurfaceLog {
    view: Option<ViewOptions>,
    markers: Vec<MarkerSpec>,
    layers: HashMap<String, Vec<Coordinate>>,
    fitted: Vec<(BoundingBox, FitOptions)>,
    destroyed: usize,
}

#[derive(Clone, Default)]
struct SharedLog(Arc<Mutex<SurfaceLog>>);

impl SharedLog {
    fn with<R>(&self, f: impl FnOnce(&SurfaceLog) -> R) -> R {
        f(&self.0.lock().unwrap())
    }
}

struct FakeSurface {
    log: SharedLog,
}

impl MapSurface for FakeSurface {
    fn add_marker(&mut self, marker: MarkerSpec) {
        self.log.0.lock().unwrap().markers.push(marker);
    }

    fn remove_markers(&mut self) {
        self.log.0.lock().unwrap().markers.clear();
    }

    fn add_route_layer(&mut self, layer_id: &str, geometry: &[Coordinate]) {
        self.log
            .0
            .lock()
            .unwrap()
            .layers
            .insert(layer_id.to_owned(), geometry.to_vec());
    }

    fn remove_route_layer(&mut self, layer_id: &str) -> bool {
        self.log.0.lock().unwrap().layers.remove(layer_id).is_some()
    }

    fn fit_bounds(&mut self, bounds: &BoundingBox, options: FitOptions) {
        self.log.0.lock().unwrap().fitted.push((*bounds, options));
    }

    fn destroy(&mut self) {
        self.log.0.lock().unwrap().destroyed += 1;
    }
}

struct FakeProvider {
    log: SharedLog,
    fail: bool,
}

impl FakeProvider {
    fn working(log: &SharedLog) -> Self {
        Self {
            log: log.clone(),
            fail: false,
        }
    }

    fn broken(log: &SharedLog) -> Self {
        Self {
            log: log.clone(),
            fail: true,
        }
    }
}

impl SurfaceProvider for FakeProvider {
    type Surface = FakeSurface;

    fn create(&self, options: &ViewOptions) -> Result<FakeSurface, SurfaceError> {
        if self.fail {
            return Err(SurfaceError::CreateFailed(
                "invalid access token".to_owned(),
            ));
        }
        self.log.0.lock().unwrap().view = Some(options.clone());
        Ok(FakeSurface {
            log: self.log.clone(),
        })
    }
}

struct StaticDirections(Vec<RouteResult>);

#[async_trait]
impl DirectionsService for StaticDirections {
    async fn driving_routes(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<Vec<RouteResult>, ServiceError> {
        Ok(self.0.clone())
    }
}

/// Answers each call with the next queued candidate list; empty once
/// drained.
struct QueueDirections(Mutex<VecDeque<Vec<RouteResult>>>);

#[async_trait]
impl DirectionsService for QueueDirections {
    async fn driving_routes(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<Vec<RouteResult>, ServiceError> {
        Ok(self.0.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Never completes; the test settles requests by hand to control ordering.
struct PendingDirections;

#[async_trait]
impl DirectionsService for PendingDirections {
    async fn driving_routes(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<Vec<RouteResult>, ServiceError> {
        std::future::pending().await
    }
}

struct FailingDirections;

#[async_trait]
impl DirectionsService for FailingDirections {
    async fn driving_routes(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<Vec<RouteResult>, ServiceError> {
        Err(ServiceError::other(std::io::Error::other(
            "connection reset by peer",
        )))
    }
}

struct StaticGeocoder(Vec<Coordinate>);

#[async_trait]
impl GeocodingService for StaticGeocoder {
    async fn forward(
        &self,
        _query: &str,
        _proximity: Coordinate,
    ) -> Result<Vec<Coordinate>, ServiceError> {
        Ok(self.0.clone())
    }
}

fn hyderabad_route() -> RouteResult {
    RouteResult {
        duration_seconds: 18_000.0,
        distance_meters: 256_000.0,
        geometry: vec![
            Coordinate::new(78.4867, 17.3850),
            Coordinate::new(77.2000, 17.6000),
            Coordinate::new(76.6731, 17.4335),
        ],
    }
}

fn widget(
    directions: Arc<dyn DirectionsService>,
    geocoding: Arc<dyn GeocodingService>,
) -> RouteFinder<FakeSurface> {
    RouteFinder::new(WidgetConfig::event_default(), directions, geocoding)
}

fn no_geocoder() -> Arc<dyn GeocodingService> {
    Arc::new(StaticGeocoder(vec![]))
}

#[test]
fn mount_places_destination_and_city_markers() {
    let log = SharedLog::default();
    let mut finder = widget(
        Arc::new(StaticDirections(vec![])),
        no_geocoder(),
    );
    finder.mount(&FakeProvider::working(&log));

    log.with(|log| {
        let view = log.view.as_ref().unwrap();
        assert!(!view.scroll_zoom);
        assert!(!view.drag_rotate);
        // one venue marker plus the five cities
        assert_eq!(log.markers.len(), 6);
        let with_action = log
            .markers
            .iter()
            .filter(|marker| {
                marker
                    .popup
                    .as_ref()
                    .is_some_and(|popup| popup.action.is_some())
            })
            .count();
        assert_eq!(with_action, 5);
    });
    assert_eq!(finder.status(), StatusLine::Prompt);
}

#[tokio::test]
async fn end_to_end_city_marker_trace() {
    let log = SharedLog::default();
    let hyderabad = city::by_name("Hyderabad").unwrap();
    let mut finder = widget(
        Arc::new(StaticDirections(vec![hyderabad_route()])),
        no_geocoder(),
    );
    finder.mount(&FakeProvider::working(&log));

    finder.popup_action(PopupAction::TraceRoute {
        origin: hyderabad.coordinate(),
    });
    assert_eq!(finder.state(), &ResolverState::Loading);
    assert_eq!(finder.status(), StatusLine::Busy);

    finder.run_until_settled().await;

    assert_eq!(finder.state(), &ResolverState::Resolved(hyderabad_route()));
    assert_eq!(
        finder.status().to_string(),
        "256 km, 5 hr 0 min driving time"
    );
    log.with(|log| {
        assert_eq!(log.layers.len(), 1);
        assert_eq!(log.layers[ROUTE_LAYER_ID], hyderabad_route().geometry);
        let (bounds, options) = log.fitted.last().unwrap();
        assert_eq!(
            *bounds,
            hyderabad_route().bounding_box().unwrap()
        );
        assert_eq!(options.padding, 80);
    });
}

#[tokio::test]
async fn search_resolves_via_geocoder() {
    let log = SharedLog::default();
    let mut finder = widget(
        Arc::new(StaticDirections(vec![hyderabad_route()])),
        Arc::new(StaticGeocoder(vec![Coordinate::new(78.4867, 17.3850)])),
    );
    finder.mount(&FakeProvider::working(&log));

    finder.submit_search("hyderabad railway station".to_owned());
    assert_eq!(finder.state(), &ResolverState::Loading);
    finder.run_until_settled().await;

    assert!(matches!(finder.state(), ResolverState::Resolved(_)));
    log.with(|log| assert_eq!(log.layers.len(), 1));
}

#[tokio::test]
async fn search_without_geocoder_match_fails() {
    let mut finder = widget(
        Arc::new(StaticDirections(vec![hyderabad_route()])),
        no_geocoder(),
    );
    finder.submit_search("nowhere".to_owned());
    finder.run_until_settled().await;

    assert_eq!(
        finder.state(),
        &ResolverState::Failed("no match found for 'nowhere'".to_owned())
    );
}

#[tokio::test]
async fn stale_response_never_overwrites_newer_outcome() {
    let log = SharedLog::default();
    let mut finder = widget(Arc::new(PendingDirections), no_geocoder());
    finder.mount(&FakeProvider::working(&log));

    let first = finder.request_route(city::by_name("Pune").unwrap().coordinate());
    let second =
        finder.request_route(city::by_name("Hyderabad").unwrap().coordinate());

    // the newer request settles first...
    finder.apply_event(WidgetEvent::RouteSettled {
        token: second,
        outcome: Ok(hyderabad_route()),
    });
    // ...and the older response arriving afterwards is dropped
    finder.apply_event(WidgetEvent::RouteSettled {
        token: first,
        outcome: Err("timed out".to_owned()),
    });

    assert_eq!(finder.state(), &ResolverState::Resolved(hyderabad_route()));
    log.with(|log| assert_eq!(log.layers.len(), 1));
}

#[tokio::test]
async fn stale_response_is_ignored_while_newer_request_is_pending() {
    let mut finder = widget(Arc::new(PendingDirections), no_geocoder());
    let first = finder.request_route(city::by_name("Pune").unwrap().coordinate());
    finder.request_route(city::by_name("Mumbai").unwrap().coordinate());

    finder.apply_event(WidgetEvent::RouteSettled {
        token: first,
        outcome: Ok(hyderabad_route()),
    });

    assert_eq!(finder.state(), &ResolverState::Loading);
}

#[tokio::test]
async fn rendering_the_same_route_twice_keeps_one_layer() {
    let log = SharedLog::default();
    let mut finder = widget(Arc::new(PendingDirections), no_geocoder());
    finder.mount(&FakeProvider::working(&log));

    let token = finder.request_route(city::by_name("Solapur").unwrap().coordinate());
    finder.apply_event(WidgetEvent::RouteSettled {
        token,
        outcome: Ok(hyderabad_route()),
    });
    finder.apply_event(WidgetEvent::RouteSettled {
        token,
        outcome: Ok(hyderabad_route()),
    });

    log.with(|log| {
        assert_eq!(log.layers.len(), 1);
        assert_eq!(log.layers[ROUTE_LAYER_ID], hyderabad_route().geometry);
    });
}

#[tokio::test]
async fn no_route_failure_retains_previous_overlay() {
    let log = SharedLog::default();
    let queue = QueueDirections(Mutex::new(VecDeque::from([
        vec![hyderabad_route()],
        vec![],
    ])));
    let mut finder = widget(Arc::new(queue), no_geocoder());
    finder.mount(&FakeProvider::working(&log));

    finder.request_route(city::by_name("Hyderabad").unwrap().coordinate());
    finder.run_until_settled().await;
    assert!(matches!(finder.state(), ResolverState::Resolved(_)));

    finder.request_route(city::by_name("Bangalore").unwrap().coordinate());
    finder.run_until_settled().await;

    assert_eq!(
        finder.state(),
        &ResolverState::Failed(NO_ROUTE_MESSAGE.to_owned())
    );
    assert_eq!(finder.status(), StatusLine::Error(NO_ROUTE_MESSAGE.to_owned()));
    // the earlier route stays on the map
    log.with(|log| {
        assert_eq!(log.layers.len(), 1);
        assert_eq!(log.layers[ROUTE_LAYER_ID], hyderabad_route().geometry);
    });
}

#[tokio::test]
async fn transport_failure_surfaces_the_message() {
    let mut finder = widget(Arc::new(FailingDirections), no_geocoder());
    finder.request_route(city::by_name("Mumbai").unwrap().coordinate());
    finder.run_until_settled().await;

    assert_eq!(
        finder.state(),
        &ResolverState::Failed("connection reset by peer".to_owned())
    );
}

#[test]
fn failed_mount_becomes_a_persistent_banner() {
    let log = SharedLog::default();
    let mut finder = widget(Arc::new(StaticDirections(vec![])), no_geocoder());
    finder.mount(&FakeProvider::broken(&log));

    assert!(finder.surface().is_none());
    assert_eq!(
        finder.status(),
        StatusLine::Unavailable(
            "map surface could not be created: invalid access token".to_owned()
        )
    );
    // a later mount attempt does not resurrect the widget
    finder.mount(&FakeProvider::working(&log));
    assert!(finder.surface().is_none());
}

#[test]
fn teardown_is_safe_in_every_lifecycle_state() {
    let log = SharedLog::default();

    // before mount
    let mut finder = widget(Arc::new(StaticDirections(vec![])), no_geocoder());
    finder.teardown();

    // after a failed mount
    finder.mount(&FakeProvider::broken(&log));
    finder.teardown();

    // after a successful mount, exactly once, repeated calls are no-ops
    let mut finder = widget(Arc::new(StaticDirections(vec![])), no_geocoder());
    finder.mount(&FakeProvider::working(&log));
    finder.teardown();
    finder.teardown();
    log.with(|log| {
        assert_eq!(log.destroyed, 1);
        // teardown sweeps the markers it placed
        assert!(log.markers.is_empty());
    });
}
