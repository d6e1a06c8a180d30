use model::Coordinate;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance between two points in meters.
pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = to_radians(a.latitude);
    let lat_b = to_radians(b.latitude);

    let dlat = lat_b - lat_a;
    let dlon = to_radians(b.longitude) - to_radians(a.longitude);

    let h = (dlat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}
