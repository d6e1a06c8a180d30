use phf::phf_map;
use schemars::JsonSchema;
use serde::Serialize;

use crate::Coordinate;

/// A fixed origin candidate with display-only labels. The labels are
/// editorial content and are not validated against live routing data.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamedCity {
    pub name: &'static str,
    pub longitude: f64,
    pub latitude: f64,
    pub distance_label: &'static str,
    pub duration_label: &'static str,
    pub summary: &'static str,
}

impl NamedCity {
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }
}

pub static HYDERABAD: NamedCity = NamedCity {
    name: "Hyderabad",
    longitude: 78.4867,
    latitude: 17.3850,
    distance_label: "256 km",
    duration_label: "5 hrs",
    summary: "via NH 65",
};

pub static PUNE: NamedCity = NamedCity {
    name: "Pune",
    longitude: 73.8567,
    latitude: 18.5204,
    distance_label: "350 km",
    duration_label: "7 hrs 30 mins",
    summary: "via NH 65 / NH 9",
};

pub static BANGALORE: NamedCity = NamedCity {
    name: "Bangalore",
    longitude: 77.5946,
    latitude: 12.9716,
    distance_label: "560 km",
    duration_label: "10 hrs 30 mins",
    summary: "via NH 50",
};

pub static SOLAPUR: NamedCity = NamedCity {
    name: "Solapur",
    longitude: 75.9068,
    latitude: 17.6599,
    distance_label: "105 km",
    duration_label: "2 hrs 30 mins",
    summary: "via NH 50",
};

pub static MUMBAI: NamedCity = NamedCity {
    name: "Mumbai",
    longitude: 72.8777,
    latitude: 19.0760,
    distance_label: "580 km",
    duration_label: "11 hrs",
    summary: "via NH 65 / AH 47",
};

/// The cities shown as origin markers, in display order.
pub static ROUTE_CITIES: [&NamedCity; 5] =
    [&HYDERABAD, &PUNE, &BANGALORE, &SOLAPUR, &MUMBAI];

/// lookup table keyed by lowercase city name
static CITY_TABLE: phf::Map<&'static str, &'static NamedCity> = phf_map! {
    "hyderabad" => &HYDERABAD,
    "pune" => &PUNE,
    "bangalore" => &BANGALORE,
    "solapur" => &SOLAPUR,
    "mumbai" => &MUMBAI,
};

pub fn by_name(name: &str) -> Option<&'static NamedCity> {
    CITY_TABLE.get(name.to_lowercase().as_str()).copied()
}
