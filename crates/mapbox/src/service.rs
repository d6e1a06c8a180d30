use std::sync::Arc;

use async_trait::async_trait;
use model::{route::RouteResult, Coordinate};
use route_finder::{DirectionsService, GeocodingService, ServiceError};

use crate::{
    client::MapboxApiClient,
    directions::get_driving_route,
    geocoding::forward_geocode,
    model::{directions::Route, geocoding::GeocodingResponse},
    ApiError,
};

impl From<ApiError> for ServiceError {
    fn from(why: ApiError) -> Self {
        ServiceError::other(why)
    }
}

fn route_from_wire(route: Route) -> RouteResult {
    RouteResult {
        duration_seconds: route.duration,
        distance_meters: route.distance,
        geometry: route
            .geometry
            .coordinates
            .into_iter()
            .map(Coordinate::from)
            .collect(),
    }
}

fn candidates_from_wire(response: GeocodingResponse) -> Vec<Coordinate> {
    response
        .features
        .into_iter()
        .map(|feature| Coordinate::from(feature.center))
        .collect()
}

/// Directions v5 behind the widget's [`DirectionsService`] seam.
pub struct MapboxDirections {
    client: Arc<MapboxApiClient>,
}

impl MapboxDirections {
    pub fn new(client: Arc<MapboxApiClient>) -> Self {
        Self {
            client,
        }
    }
}

#[async_trait]
impl DirectionsService for MapboxDirections {
    async fn driving_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteResult>, ServiceError> {
        let response = get_driving_route(&self.client, origin, destination).await?;
        log::debug!(
            "directions answered '{}' with {} candidate(s)",
            response.code,
            response.routes.len()
        );
        Ok(response.routes.into_iter().map(route_from_wire).collect())
    }
}

/// Geocoding v5 behind the widget's [`GeocodingService`] seam.
pub struct MapboxGeocoder {
    client: Arc<MapboxApiClient>,
}

impl MapboxGeocoder {
    pub fn new(client: Arc<MapboxApiClient>) -> Self {
        Self {
            client,
        }
    }
}

#[async_trait]
impl GeocodingService for MapboxGeocoder {
    async fn forward(
        &self,
        query: &str,
        proximity: Coordinate,
    ) -> Result<Vec<Coordinate>, ServiceError> {
        let response = forward_geocode(&self.client, query, proximity).await?;
        Ok(candidates_from_wire(response))
    }
}
