use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::GoogleMapsConfig,
    entities::Place,
    error::{config_error, upstream_error, Error},
    external::PlaceSource,
};

const NEARBY_SEARCH_PATH: &str = "/maps/api/place/nearbysearch/json";

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    error_message: Option<String>,
    results: Option<T>,
}

impl<T> Response<T> {
    fn is_success(&self) -> bool {
        self.status == "OK" || self.status == "ZERO_RESULTS"
    }
}

/// Google Maps Places client. Holds one `reqwest::Client` so connections are
/// reused between crawls.
#[derive(Clone, Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    config: GoogleMapsConfig,
}

impl GoogleMaps {
    pub fn new(config: GoogleMapsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl PlaceSource for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn fetch_places(&self, location: &str, radius: f64) -> Result<Vec<Place>, Error> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| config_error("GOOGLE_MAPS_API_KEY is not configured"))?;

        let url = format!("{}{}", self.config.api_base, NEARBY_SEARCH_PATH);
        let radius = radius.to_string();

        let res = self
            .client
            .get(url)
            .query(&[("location", location), ("radius", radius.as_str()), ("key", key)])
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            return Err(upstream_error(format!(
                "Google Maps API responded with HTTP {}",
                status
            )));
        }

        // Results stay untyped so one oddly shaped record cannot fail the
        // whole response.
        let data: Response<Vec<Value>> = res.json().await?;

        if !data.is_success() {
            let message = match data.error_message {
                Some(detail) => format!("Google Maps API error: {} ({})", data.status, detail),
                None => format!("Google Maps API error: {}", data.status),
            };
            return Err(upstream_error(message));
        }

        let mut places = Vec::new();
        let mut skipped = 0;

        for (index, result) in data.results.unwrap_or_default().into_iter().enumerate() {
            match Place::try_from(result) {
                Ok(place) => places.push(place),
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(index, error = %err, "skipping search result");
                }
            }
        }

        tracing::info!(count = places.len(), skipped, status = %data.status, "fetched places");

        Ok(places)
    }
}
