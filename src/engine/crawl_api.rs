use super::{persistence::save_places, Engine};

use async_trait::async_trait;

use crate::{
    api::CrawlAPI,
    entities::{CrawlRequest, CrawlSummary},
    error::Error,
};

#[async_trait]
impl CrawlAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn crawl(&self, request: CrawlRequest) -> Result<CrawlSummary, Error> {
        let (location, radius) = request.validate()?;

        let places = self.source.fetch_places(&location, radius).await?;
        let saved = save_places(self.store.as_ref(), &places).await?;

        Ok(CrawlSummary::new(saved, places.len()))
    }
}
