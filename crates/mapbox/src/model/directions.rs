use serde::{Deserialize, Serialize};

/// GEOJSON LineString as returned with `geometries=geojson`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineString {
    /// each entry is [longitude, latitude]
    pub coordinates: Vec<[f64; 2]>,

    /// the type of the GEOJSON object, always "LineString" here
    #[serde(rename = "type")]
    pub geojson_type: String,
}

/// One candidate route of a Directions v5 response.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// estimated travel time in seconds
    pub duration: f64,

    /// route length in meters
    pub distance: f64,

    pub geometry: LineString,

    pub weight: Option<f64>,

    pub weight_name: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: Option<String>,

    /// snapped position as [longitude, latitude]
    pub location: [f64; 2],
}

/// Directions v5 response envelope. `code` is "Ok" on success; routes are
/// ordered best first and may be empty.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub code: String,

    #[serde(default)]
    pub routes: Vec<Route>,

    #[serde(default)]
    pub waypoints: Vec<Waypoint>,

    pub uuid: Option<String>,
}
