use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// Central University of Karnataka, the fixed route destination.
pub const VENUE_COORDINATE: Coordinate = Coordinate::new(76.6731, 17.4335);

/// Default camera settings for the map view.
pub const DEFAULT_ZOOM: f64 = 15.0;
pub const DEFAULT_PITCH: f64 = 35.0;

/// The event venue: the one process-wide destination of every route.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
}

impl Venue {
    pub fn event_default() -> Self {
        Self {
            name: "Grand AI Hackathon".to_owned(),
            address: "Central University of Karnataka, Kadaganchi, Kalaburagi, \
                      Karnataka - 585367"
                .to_owned(),
            coordinate: VENUE_COORDINATE,
        }
    }
}
