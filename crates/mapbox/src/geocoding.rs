use model::Coordinate;

use crate::{
    client::{MapboxApiClient, MAPBOX_API_URL},
    model::geocoding::GeocodingResponse,
    ApiError,
};

/// The free text becomes one path segment of the request URL. Pushing it
/// through the segment API percent-encodes `/`, `?`, and `#`, which would
/// otherwise split the path or truncate the query.
fn geocoding_url(query: &str) -> Result<reqwest::Url, ApiError> {
    let mut url = reqwest::Url::parse(MAPBOX_API_URL)
        .map_err(|why| ApiError::InvalidUrl(why.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidUrl("cannot be a base".to_owned()))?
        .extend(["geocoding", "v5", "mapbox.places"])
        .push(&format!("{query}.json"));
    Ok(url)
}

/// Forward-geocodes free text, biased towards `proximity` so ambiguous
/// queries resolve near the venue.
pub async fn forward_geocode(
    client: &MapboxApiClient,
    query: &str,
    proximity: Coordinate,
) -> Result<GeocodingResponse, ApiError> {
    let url = geocoding_url(query)?;
    let proximity = proximity.to_string();

    /* fetch data */
    client
        .get_url(url, &[("proximity", proximity.as_str())])
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_text_stays_inside_one_path_segment() {
        let url = geocoding_url("#12, Anand Rao Circle").unwrap();
        // nothing of the user's text may leak into URL structure
        assert!(url.fragment().is_none());
        assert!(url.query().is_none());
        let path = url.path();
        assert!(path.starts_with("/geocoding/v5/mapbox.places/"));
        assert!(path.ends_with(".json"));
        assert!(path.contains("%2312,"));
    }

    #[test]
    fn slashes_and_question_marks_are_encoded() {
        let url = geocoding_url("NH 65 / NH 9?").unwrap();
        assert!(url.query().is_none());
        assert!(url.path().contains("%2F"));
        assert!(url.path().contains("%3F"));
        assert!(url.path().ends_with(".json"));
    }

    #[test]
    fn plain_queries_keep_the_expected_endpoint() {
        let url = geocoding_url("Kalaburagi").unwrap();
        assert_eq!(url.path(), "/geocoding/v5/mapbox.places/Kalaburagi.json");
    }
}
