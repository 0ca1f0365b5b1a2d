use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{CrawlRequest, CrawlSummary, Page, PageRequest, Place};
use crate::error::Error;

#[async_trait]
pub trait CrawlAPI {
    /// Searches around the requested location and saves what comes back.
    async fn crawl(&self, request: CrawlRequest) -> Result<CrawlSummary, Error>;
}

#[async_trait]
pub trait PlaceAPI {
    /// Every stored place, newest first.
    async fn list_places(&self) -> Result<Vec<Place>, Error>;
    async fn list_places_page(&self, page: PageRequest) -> Result<Page<Place>, Error>;
}

pub trait API: CrawlAPI + PlaceAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
