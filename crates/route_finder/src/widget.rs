use std::fmt;
use std::sync::Arc;

use model::{city::NamedCity, route::RouteResult, venue::Venue, Coordinate};
use tokio::sync::mpsc;
use utility::geo::haversine_distance_m;

use crate::{
    geocoder::GeocoderInput,
    panel::{self, StatusLine},
    resolver::{
        RequestToken, ResolveOutcome, ResolverState, RouteResolver, Settlement,
        NO_ROUTE_MESSAGE,
    },
    surface::{
        FitOptions, MapSurface, MarkerSpec, Popup, PopupAction, SurfaceProvider,
        ViewOptions, ROUTE_LAYER_ID,
    },
    DirectionsService, GeocodingService,
};

const DESTINATION_MARKER_COLOR: &str = "#7C3AED";
const CITY_MARKER_COLOR: &str = "#FCD34D";

const FIT_PADDING: u32 = 80;
const FIT_DURATION_MS: u64 = 1500;

/// The map surface could not be created. Not recoverable within the
/// widget's lifetime; the status output turns into a persistent banner.
#[derive(Debug)]
pub struct InitializationError {
    pub message: String,
}

impl fmt::Display for InitializationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InitializationError {}

/// Everything the widget reacts to. User gestures and network completions
/// are delivered through the same single-consumer channel, so all state
/// and surface mutation happens on one event loop.
#[derive(Debug)]
pub enum WidgetEvent {
    TraceRouteRequested { origin: Coordinate },
    SearchSubmitted { query: String },
    RouteSettled {
        token: RequestToken,
        outcome: ResolveOutcome,
    },
}

#[derive(Clone)]
pub struct WidgetConfig {
    pub venue: Venue,
    pub cities: &'static [&'static NamedCity],
}

impl WidgetConfig {
    pub fn event_default() -> Self {
        Self {
            venue: Venue::event_default(),
            cities: &model::city::ROUTE_CITIES,
        }
    }
}

/// The route finder widget: one map surface, one resolver, one geocoder.
///
/// Mounted once, torn down once. The two network calls are the only
/// suspension points; they run in spawned tasks and report back as
/// [`WidgetEvent::RouteSettled`]. Superseded requests are not cancelled at
/// the transport level, their late responses are discarded by token.
pub struct RouteFinder<S: MapSurface> {
    config: WidgetConfig,
    surface: Option<S>,
    init_error: Option<InitializationError>,
    resolver: RouteResolver,
    geocoder: GeocoderInput,
    directions: Arc<dyn DirectionsService>,
    events_tx: mpsc::UnboundedSender<WidgetEvent>,
    events_rx: mpsc::UnboundedReceiver<WidgetEvent>,
}

impl<S: MapSurface> RouteFinder<S> {
    pub fn new(
        config: WidgetConfig,
        directions: Arc<dyn DirectionsService>,
        geocoding: Arc<dyn GeocodingService>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let geocoder = GeocoderInput::new(geocoding, config.venue.coordinate);
        Self {
            config,
            surface: None,
            init_error: None,
            resolver: RouteResolver::new(),
            geocoder,
            directions,
            events_tx,
            events_rx,
        }
    }

    /// Creates the map view exactly once and places the destination marker
    /// plus one marker per configured city. A provider failure is recorded
    /// instead of propagated; the widget stays alive in its error state.
    pub fn mount<P>(&mut self, provider: &P)
    where
        P: SurfaceProvider<Surface = S>,
    {
        if self.surface.is_some() || self.init_error.is_some() {
            return;
        }
        let options = ViewOptions::for_venue(&self.config.venue);
        let mut surface = match provider.create(&options) {
            Ok(surface) => surface,
            Err(why) => {
                log::error!("{why}");
                self.init_error = Some(InitializationError {
                    message: why.to_string(),
                });
                return;
            }
        };
        surface.add_marker(MarkerSpec {
            coordinate: self.config.venue.coordinate,
            color: DESTINATION_MARKER_COLOR.to_owned(),
            popup: Some(Popup {
                title: self.config.venue.name.clone(),
                body: self.config.venue.address.clone(),
                action: None,
            }),
        });
        for city in self.config.cities {
            surface.add_marker(MarkerSpec {
                coordinate: city.coordinate(),
                color: CITY_MARKER_COLOR.to_owned(),
                popup: Some(Popup {
                    title: city.name.to_owned(),
                    body: format!(
                        "{} / {} by road, {}",
                        city.distance_label, city.duration_label, city.summary
                    ),
                    action: Some(PopupAction::TraceRoute {
                        origin: city.coordinate(),
                    }),
                }),
            });
        }
        self.surface = Some(surface);
    }

    /// Entry point for marker popups. Both this and [`Self::submit_search`]
    /// converge on one resolver invocation per gesture.
    pub fn popup_action(&mut self, action: PopupAction) {
        match action {
            PopupAction::TraceRoute { origin } => {
                self.request_route(origin);
            }
        }
    }

    /// Starts a route lookup from a known origin coordinate. Returns the
    /// request token; any request started later supersedes this one.
    pub fn request_route(&mut self, origin: Coordinate) -> RequestToken {
        let destination = self.config.venue.coordinate;
        let token = self.resolver.begin();
        log::debug!(
            "origin is {:.1} km from the venue in a straight line",
            haversine_distance_m(origin, destination) / 1000.0
        );
        let directions = Arc::clone(&self.directions);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = fetch_route(directions.as_ref(), origin, destination).await;
            let _ = events.send(WidgetEvent::RouteSettled { token, outcome });
        });
        token
    }

    /// Starts a free-text search. Geocoding and the subsequent directions
    /// lookup run under the same token, so a slow geocode can never
    /// clobber a newer request either.
    pub fn submit_search(&mut self, query: String) -> RequestToken {
        let destination = self.config.venue.coordinate;
        let token = self.resolver.begin();
        let geocoder = self.geocoder.clone();
        let directions = Arc::clone(&self.directions);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = match geocoder.lookup(&query).await {
                Ok(origin) => {
                    fetch_route(directions.as_ref(), origin, destination).await
                }
                Err(why) => Err(why.to_string()),
            };
            let _ = events.send(WidgetEvent::RouteSettled { token, outcome });
        });
        token
    }

    pub fn apply_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::TraceRouteRequested { origin } => {
                self.request_route(origin);
            }
            WidgetEvent::SearchSubmitted { query } => {
                self.submit_search(query);
            }
            WidgetEvent::RouteSettled { token, outcome } => {
                self.settle(token, outcome);
            }
        }
    }

    /// Drives the event loop until the pending request has settled. A
    /// no-op when nothing is loading.
    pub async fn run_until_settled(&mut self) {
        while matches!(self.resolver.state(), ResolverState::Loading) {
            let Some(event) = self.events_rx.recv().await else {
                break;
            };
            self.apply_event(event);
        }
    }

    fn settle(&mut self, token: RequestToken, outcome: ResolveOutcome) {
        if self.resolver.settle(token, outcome) == Settlement::Stale {
            return;
        }
        // on failure the previous overlay is retained, not cleared
        if let ResolverState::Resolved(route) = self.resolver.state() {
            let route = route.clone();
            self.render_route(&route);
        }
    }

    /// Replaces the route overlay and re-frames the viewport. Idempotent:
    /// the overlay is removed by its fixed id before being added again.
    fn render_route(&mut self, route: &RouteResult) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.remove_route_layer(ROUTE_LAYER_ID);
        surface.add_route_layer(ROUTE_LAYER_ID, &route.geometry);
        if let Some(bounds) = route.bounding_box() {
            surface.fit_bounds(
                &bounds,
                FitOptions {
                    padding: FIT_PADDING,
                    duration_ms: FIT_DURATION_MS,
                },
            );
        }
    }

    /// Current panel content: the initialization banner when the surface
    /// never came up, otherwise the projected resolver state.
    pub fn status(&self) -> StatusLine {
        match &self.init_error {
            Some(why) => StatusLine::Unavailable(why.to_string()),
            None => panel::project(self.resolver.state()),
        }
    }

    pub fn state(&self) -> &ResolverState {
        self.resolver.state()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Sender half for hosts that deliver gestures asynchronously.
    pub fn events(&self) -> mpsc::UnboundedSender<WidgetEvent> {
        self.events_tx.clone()
    }

    /// Releases the map view. Markers are removed before the surface is
    /// destroyed so a pooled surface comes back clean. Safe to call before
    /// [`Self::mount`], after a failed mount, and more than once.
    pub fn teardown(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.remove_markers();
            surface.destroy();
        }
    }
}

async fn fetch_route(
    directions: &dyn DirectionsService,
    origin: Coordinate,
    destination: Coordinate,
) -> ResolveOutcome {
    match directions.driving_routes(origin, destination).await {
        Ok(candidates) => candidates
            .into_iter()
            .next()
            .ok_or_else(|| NO_ROUTE_MESSAGE.to_owned()),
        Err(why) => Err(why.to_string()),
    }
}
