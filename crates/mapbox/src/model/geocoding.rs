use serde::{Deserialize, Serialize};

/// One forward-geocoding candidate. Only the fields the widget consumes
/// are modelled; the API returns considerably more.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// human-readable place name including its hierarchy
    pub place_name: Option<String>,

    /// candidate position as [longitude, latitude]
    pub center: [f64; 2],

    /// match quality in 0..=1
    pub relevance: Option<f64>,
}

/// Geocoding v5 forward response, a GEOJSON FeatureCollection with
/// candidates ordered best first.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingResponse {
    #[serde(rename = "type")]
    pub geojson_type: String,

    #[serde(default)]
    pub features: Vec<Feature>,

    pub attribution: Option<String>,
}
