//! In-memory doubles for the store and the place source.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::{
    db::{InsertOutcome, Store, StoreTransaction},
    entities::{Place, StoredRow},
    error::{persistence_error, Error},
    external::PlaceSource,
};

#[derive(Default)]
struct Rows {
    rows: Vec<StoredRow>,
    next_id: i64,
    /// Seconds after `epoch()` of the last commit.
    clock: i64,
}

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// A `Store` that keeps rows in memory and counts how it is used.
///
/// Rows inserted in one transaction share a timestamp, as they would under
/// Postgres `now()`. Documents containing a NUL character are rejected, the
/// same way `jsonb` rejects `\u0000`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Mutex<Rows>,
    begins: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
    reads: AtomicUsize,
    fail_begin: AtomicBool,
    fail_commit: AtomicBool,
    fail_insert_at: Mutex<Option<usize>>,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one committed row per place, each a second newer than the last.
    pub fn seeded(places: Vec<Place>) -> Self {
        let store = Self::new();
        {
            let mut state = store.inner.rows.lock().unwrap();
            for place in places {
                state.clock += 1;
                state.next_id += 1;
                let row = StoredRow {
                    id: state.next_id,
                    data: place,
                    created_at: epoch() + Duration::seconds(state.clock),
                };
                state.rows.push(row);
            }
        }
        store
    }

    pub fn failing_begin(self) -> Self {
        self.inner.fail_begin.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_commit(self) -> Self {
        self.inner.fail_commit.store(true, Ordering::SeqCst);
        self
    }

    /// The insert attempt at `index` (0-based, within a transaction) fails
    /// as if the connection had dropped.
    pub fn failing_insert_at(self, index: usize) -> Self {
        *self.inner.fail_insert_at.lock().unwrap() = Some(index);
        self
    }

    pub fn failing_reads(self) -> Self {
        self.inner.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    pub fn rows(&self) -> Vec<StoredRow> {
        self.inner.rows.lock().unwrap().rows.clone()
    }

    pub fn begins(&self) -> usize {
        self.inner.begins.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.inner.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.inner.rollbacks.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.inner.reads.load(Ordering::SeqCst)
    }

    fn sorted(&self) -> Result<Vec<StoredRow>, Error> {
        self.inner.reads.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(persistence_error("connection reset by peer"));
        }

        let mut rows = self.rows();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), Error> {
        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, Error> {
        self.inner.begins.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_begin.load(Ordering::SeqCst) {
            return Err(persistence_error("pool timed out while waiting for an open connection"));
        }

        Ok(Box::new(MemoryTransaction {
            store: self.clone(),
            staged: Vec::new(),
            attempts: 0,
        }))
    }

    async fn fetch_all(&self) -> Result<Vec<StoredRow>, Error> {
        self.sorted()
    }

    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<StoredRow>, Error> {
        Ok(self
            .sorted()?
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, Error> {
        Ok(self.sorted()?.len() as i64)
    }
}

struct MemoryTransaction {
    store: MemoryStore,
    staged: Vec<Place>,
    attempts: usize,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn insert(&mut self, place: &Place) -> Result<InsertOutcome, Error> {
        let attempt = self.attempts;
        self.attempts += 1;
        if *self.store.inner.fail_insert_at.lock().unwrap() == Some(attempt) {
            return Err(persistence_error("connection closed"));
        }

        let json = serde_json::to_string(place).unwrap();
        if json.contains("\\u0000") {
            return Ok(InsertOutcome::Rejected(persistence_error(
                "unsupported Unicode escape sequence",
            )));
        }

        self.staged.push(place.clone());
        let state = self.store.inner.rows.lock().unwrap();
        Ok(InsertOutcome::Inserted(
            state.next_id + self.staged.len() as i64,
        ))
    }

    async fn commit(self: Box<Self>) -> Result<(), Error> {
        let MemoryTransaction { store, staged, .. } = *self;
        let inner = &store.inner;
        if inner.fail_commit.load(Ordering::SeqCst) {
            return Err(persistence_error("could not serialize access"));
        }

        let mut state = inner.rows.lock().unwrap();
        state.clock += 1;
        let created_at = epoch() + Duration::seconds(state.clock);
        for place in staged {
            state.next_id += 1;
            let id = state.next_id;
            state.rows.push(StoredRow {
                id,
                data: place,
                created_at,
            });
        }
        inner.commits.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), Error> {
        self.store.inner.rollbacks.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}

/// A `PlaceSource` returning canned places and counting calls.
#[derive(Clone)]
pub struct StubPlaceSource {
    response: Result<Vec<Place>, Error>,
    calls: Arc<AtomicUsize>,
}

impl StubPlaceSource {
    pub fn with_places(places: Vec<Place>) -> Self {
        Self {
            response: Ok(places),
            calls: Arc::default(),
        }
    }

    pub fn with_error(err: Error) -> Self {
        Self {
            response: Err(err),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaceSource for StubPlaceSource {
    async fn fetch_places(&self, _location: &str, _radius: f64) -> Result<Vec<Place>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// `count` places with ids `p0`, `p1`, ...
pub fn places(count: usize) -> Vec<Place> {
    (0..count)
        .map(|i| Place::named(&format!("p{}", i), &format!("Place {}", i)))
        .collect()
}

/// A place Postgres would refuse to store.
pub fn malformed_place(id: &str) -> Place {
    Place::named(id, "bad\u{0}name")
}
