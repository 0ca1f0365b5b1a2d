use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Place;

/// A persisted place. Rows are never updated after insert.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredRow {
    pub id: i64,
    pub data: Place,
    pub created_at: DateTime<Utc>,
}
