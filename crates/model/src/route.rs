use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{BoundingBox, Coordinate};

/// One resolved driving route between an origin and the venue.
///
/// At most one of these is live on the map surface at a time; a new
/// successful resolution replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub duration_seconds: f64,
    pub distance_meters: f64,
    /// Ordered driving path from origin to destination.
    pub geometry: Vec<Coordinate>,
}

impl RouteResult {
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::of_path(&self.geometry)
    }
}
