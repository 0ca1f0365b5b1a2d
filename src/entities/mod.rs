mod crawl;
mod page;
mod place;
mod row;

pub use crawl::{CrawlRequest, CrawlSummary, MISSING_PARAMETERS};
pub use page::{Page, PageRequest, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use place::{Coordinates, Place};
pub use row::StoredRow;
