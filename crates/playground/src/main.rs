use std::sync::Arc;

use mapbox::{
    client::{MapboxApiClient, MapboxCredentials},
    service::{MapboxDirections, MapboxGeocoder},
};
use model::{city, BoundingBox, Coordinate};
use route_finder::{
    surface::{FitOptions, MapSurface, MarkerSpec, SurfaceError, SurfaceProvider, ViewOptions},
    widget::{RouteFinder, WidgetConfig},
};
use utility::geo::haversine_distance_m;

/// A surface that only narrates what a real map would do.
struct ConsoleSurface;

impl MapSurface for ConsoleSurface {
    fn add_marker(&mut self, marker: MarkerSpec) {
        let title = marker
            .popup
            .as_ref()
            .map(|popup| popup.title.as_str())
            .unwrap_or("<unnamed>");
        println!("marker '{}' at {}", title, marker.coordinate);
    }

    fn remove_markers(&mut self) {
        println!("markers cleared");
    }

    fn add_route_layer(&mut self, layer_id: &str, geometry: &[Coordinate]) {
        println!("layer '{}' with {} path points", layer_id, geometry.len());
    }

    fn remove_route_layer(&mut self, layer_id: &str) -> bool {
        println!("layer '{}' removed", layer_id);
        true
    }

    fn fit_bounds(&mut self, bounds: &BoundingBox, options: FitOptions) {
        println!(
            "viewport fit to {} .. {} (padding {})",
            bounds.south_west, bounds.north_east, options.padding
        );
    }

    fn destroy(&mut self) {
        println!("surface destroyed");
    }
}

struct ConsoleProvider;

impl SurfaceProvider for ConsoleProvider {
    type Surface = ConsoleSurface;

    fn create(&self, options: &ViewOptions) -> Result<ConsoleSurface, SurfaceError> {
        println!(
            "view at {} (zoom {}, pitch {})",
            options.center, options.zoom, options.pitch
        );
        Ok(ConsoleSurface)
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let credentials = MapboxCredentials::env().expect("expected MAPBOX_ACCESS_TOKEN.");
    let client = Arc::new(MapboxApiClient::new(&credentials));

    let mut widget = RouteFinder::new(
        WidgetConfig::event_default(),
        Arc::new(MapboxDirections::new(client.clone())),
        Arc::new(MapboxGeocoder::new(client)),
    );
    widget.mount(&ConsoleProvider);

    let hyderabad = city::by_name("Hyderabad").expect("expected Hyderabad to be configured.");
    let venue = model::venue::VENUE_COORDINATE;
    println!(
        "straight line {}: {:.1} km",
        hyderabad.name,
        haversine_distance_m(hyderabad.coordinate(), venue) / 1000.0
    );

    widget.request_route(hyderabad.coordinate());
    widget.run_until_settled().await;
    println!("{}", widget.status());

    widget.submit_search("Kalaburagi railway station".to_owned());
    widget.run_until_settled().await;
    println!("{}", widget.status());

    widget.teardown();
}
