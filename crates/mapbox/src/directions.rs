use model::Coordinate;

use crate::{client::MapboxApiClient, model::directions::DirectionsResponse, ApiError};

/// Requests driving directions between two points. Candidates come back
/// best first; the full geometry is requested so the route can be drawn.
pub async fn get_driving_route(
    client: &MapboxApiClient,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<DirectionsResponse, ApiError> {
    /* fetch data */
    client
        .get(
            &format!("directions/v5/mapbox/driving/{origin};{destination}"),
            &[("geometries", "geojson"), ("overview", "full")],
        )
        .await
}
