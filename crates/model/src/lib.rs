use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod city;
pub mod route;
pub mod venue;

/// A WGS84 point in (longitude, latitude) order, matching the wire format
/// of the map and directions services.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

/// Axis-aligned box spanned by two corners, used for viewport fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl BoundingBox {
    pub fn around(coordinate: Coordinate) -> Self {
        Self {
            south_west: coordinate,
            north_east: coordinate,
        }
    }

    pub fn extend(&mut self, coordinate: Coordinate) {
        self.south_west.longitude = self.south_west.longitude.min(coordinate.longitude);
        self.south_west.latitude = self.south_west.latitude.min(coordinate.latitude);
        self.north_east.longitude = self.north_east.longitude.max(coordinate.longitude);
        self.north_east.latitude = self.north_east.latitude.max(coordinate.latitude);
    }

    /// The smallest box containing every point of the path. `None` for an
    /// empty path.
    pub fn of_path(path: &[Coordinate]) -> Option<Self> {
        let (first, rest) = path.split_first()?;
        let mut bounds = Self::around(*first);
        for coordinate in rest {
            bounds.extend(*coordinate);
        }
        Some(bounds)
    }
}
