pub mod google_maps;

use async_trait::async_trait;

use crate::{entities::Place, error::Error};

pub use google_maps::GoogleMaps;

/// Something that can look up the places around a location.
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Issues exactly one search. An empty result is not an error.
    async fn fetch_places(&self, location: &str, radius: f64) -> Result<Vec<Place>, Error>;
}
