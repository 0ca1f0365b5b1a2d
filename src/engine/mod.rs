mod crawl_api;
mod persistence;
mod place_api;

use std::sync::Arc;

use crate::{api::API, db::Store, external::PlaceSource};

pub use persistence::save_places;

pub struct Engine {
    store: Arc<dyn Store>,
    source: Arc<dyn PlaceSource>,
}

impl Engine {
    pub fn new(store: Arc<dyn Store>, source: Arc<dyn PlaceSource>) -> Self {
        Self { store, source }
    }
}

impl API for Engine {}
