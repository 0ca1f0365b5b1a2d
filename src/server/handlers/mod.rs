pub mod crawl;
pub mod places;
pub mod root;
