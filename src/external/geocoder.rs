use serde::Deserialize;
use std::env;

use crate::entities::Coordinates;
use crate::error::{backend_error, not_found_error, Error};

const DEFAULT_API_BASE: &str = "https://nominatim.openstreetmap.org";

/// Free-text place resolution against a Nominatim-style service.
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
}

// the service returns coordinates as strings
#[derive(Clone, Debug, Deserialize)]
struct GeocodeResult {
    lat: String,
    lon: String,
}

impl Geocoder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        let base_url = env::var("GEOCODER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        Self::new(base_url)
    }

    #[tracing::instrument(skip(self))]
    pub async fn geocode(&self, place: &str) -> Result<Coordinates, Error> {
        let res = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("format", "json"), ("q", place)])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(backend_error("geocoding service error"));
        }

        let results: Vec<GeocodeResult> = res
            .json()
            .await
            .map_err(|_| backend_error("malformed geocoding response"))?;

        let first = match results.first() {
            Some(first) => first,
            None => return Err(not_found_error("no match for place")),
        };

        let latitude = first
            .lat
            .parse()
            .map_err(|_| backend_error("malformed geocoding response"))?;
        let longitude = first
            .lon
            .parse()
            .map_err(|_| backend_error("malformed geocoding response"))?;

        Ok(Coordinates::new(latitude, longitude))
    }
}
