use std::env;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ApiError;

pub const MAPBOX_API_URL: &str = "https://api.mapbox.com";

/// The account access token all Mapbox APIs authenticate with. Passed in
/// explicitly; never stored in a module-level global.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapboxCredentials {
    pub access_token: String,
}

impl MapboxCredentials {
    pub fn env() -> Result<Self, ApiError> {
        let access_token = env::var("MAPBOX_ACCESS_TOKEN").map_err(|_| {
            ApiError::MissingCredential("MAPBOX_ACCESS_TOKEN".to_owned())
        })?;
        Ok(Self {
            access_token,
        })
    }
}

pub struct MapboxApiClient {
    pub credentials: MapboxCredentials,
}

impl MapboxApiClient {
    pub fn new(credentials: &MapboxCredentials) -> Self {
        Self {
            credentials: credentials.clone(),
        }
    }

    /// Fetch data from an endpoint using this client.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = reqwest::Url::parse(&format!("{MAPBOX_API_URL}/{endpoint}"))
            .map_err(|why| ApiError::InvalidUrl(why.to_string()))?;
        self.get_url(url, query).await
    }

    /// Fetch data from a fully built request URL. Callers embedding
    /// free-form text in the path construct the URL themselves so the
    /// text is percent-encoded as a path segment.
    pub async fn get_url<T: DeserializeOwned>(
        &self,
        url: reqwest::Url,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        log::info!("requesting endpoint '{}'.", url.path());
        let client = reqwest::Client::new();

        /* perform get-request */
        let response = client
            .get(url.clone())
            .query(query)
            .query(&[("access_token", self.credentials.access_token.as_str())])
            .send()
            .await?;

        /* parse response */
        match response.status() {
            reqwest::StatusCode::OK => Ok(response.json().await?),
            other => match response.text().await {
                Ok(val) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url: url.to_string(),
                    response: Some(val),
                }),
                Err(_) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url: url.to_string(),
                    response: None,
                }),
            },
        }
    }
}
