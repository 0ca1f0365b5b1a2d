use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PlaceAPI,
    entities::{Page, PageRequest, Place},
    error::Error,
};

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_places(&self) -> Result<Vec<Place>, Error> {
        let rows = self.store.fetch_all().await?;

        Ok(rows.into_iter().map(|row| row.data).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn list_places_page(&self, page: PageRequest) -> Result<Page<Place>, Error> {
        // separate pooled connections, so the two queries overlap
        let (rows, total) = futures::try_join!(
            self.store.fetch_page(page.limit, page.offset),
            self.store.count()
        )?;

        Ok(Page {
            data: rows.into_iter().map(|row| row.data).collect(),
            total,
        })
    }
}
