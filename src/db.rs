use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions, PgRow},
    types::Json,
    Acquire, Executor, Pool, Postgres, Row, Transaction,
};

use crate::{
    config::DatabaseConfig,
    entities::{Place, StoredRow},
    error::{persistence_error, schema_error, Error},
};

type Database = Postgres;

/// Serialises concurrent schema bootstraps across processes.
const SCHEMA_LOCK_KEY: i64 = 0x706c_6163_6573;

const SELECT_ALL: &str =
    "SELECT id, data, created_at FROM places_data ORDER BY created_at DESC, id DESC";
const SELECT_PAGE: &str = "SELECT id, data, created_at FROM places_data ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2";
const COUNT: &str = "SELECT COUNT(*) AS count FROM places_data";
const INSERT: &str = "INSERT INTO places_data (data) VALUES ($1) RETURNING id";

/// Result of a single insert inside a batch.
#[derive(Debug)]
pub enum InsertOutcome {
    Inserted(i64),
    /// The store refused this document. The transaction is still usable.
    Rejected(Error),
}

/// Storage for place documents.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), Error>;

    /// Takes a connection from the pool and opens a transaction on it. The
    /// connection goes back to the pool when the transaction is committed,
    /// rolled back or dropped.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, Error>;

    async fn fetch_all(&self) -> Result<Vec<StoredRow>, Error>;
    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<StoredRow>, Error>;
    async fn count(&self) -> Result<i64, Error>;
}

#[async_trait]
pub trait StoreTransaction: Send {
    /// `Err` is reserved for failures that leave the transaction unusable.
    async fn insert(&mut self, place: &Place) -> Result<InsertOutcome, Error>;
    async fn commit(self: Box<Self>) -> Result<(), Error>;
    async fn rollback(self: Box<Self>) -> Result<(), Error>;
}

pub struct PgStore {
    pool: Pool<Database>,
}

impl PgStore {
    /// Builds the pool without connecting; the first connection is made by
    /// `ensure_schema` or the first query.
    pub fn new(config: &DatabaseConfig) -> Self {
        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port);

        if let Some(database) = &config.database {
            options = options.database(database);
        }
        if let Some(user) = &config.user {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(options);

        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    #[tracing::instrument(name = "PgStore::ensure_schema", skip_all)]
    async fn ensure_schema(&self) -> Result<(), Error> {
        let mut tx = self.pool.begin().await.map_err(schema_error)?;

        tx.execute(sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(SCHEMA_LOCK_KEY))
            .await
            .map_err(schema_error)?;

        tx.execute(
            "CREATE TABLE IF NOT EXISTS places_data (
                id BIGSERIAL PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .await
        .map_err(schema_error)?;

        tx.execute("CREATE INDEX IF NOT EXISTS idx_places_data ON places_data USING GIN (data)")
            .await
            .map_err(schema_error)?;

        tx.commit().await.map_err(schema_error)?;

        tracing::info!("database schema is ready");

        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, Error> {
        let tx = self.pool.begin().await?;

        Ok(Box::new(PgTransaction { tx }))
    }

    async fn fetch_all(&self) -> Result<Vec<StoredRow>, Error> {
        let rows = self.pool.fetch_all(sqlx::query(SELECT_ALL)).await?;

        rows.iter().map(stored_row).collect()
    }

    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<StoredRow>, Error> {
        let rows = self
            .pool
            .fetch_all(sqlx::query(SELECT_PAGE).bind(limit).bind(offset))
            .await?;

        rows.iter().map(stored_row).collect()
    }

    async fn count(&self) -> Result<i64, Error> {
        let row = self.pool.fetch_one(sqlx::query(COUNT)).await?;

        Ok(row.try_get("count")?)
    }
}

fn stored_row(row: &PgRow) -> Result<StoredRow, Error> {
    let Json(data) = row.try_get("data")?;

    Ok(StoredRow {
        id: row.try_get("id")?,
        data,
        created_at: row.try_get("created_at")?,
    })
}

struct PgTransaction {
    tx: Transaction<'static, Database>,
}

#[async_trait]
impl StoreTransaction for PgTransaction {
    // A failed statement aborts the whole Postgres transaction, so each row
    // gets its own savepoint.
    async fn insert(&mut self, place: &Place) -> Result<InsertOutcome, Error> {
        let mut savepoint = Acquire::begin(&mut self.tx).await?;

        let result = savepoint
            .fetch_one(sqlx::query(INSERT).bind(Json(place)))
            .await;

        match result {
            Ok(row) => {
                let id: i64 = row.try_get("id")?;
                savepoint.commit().await?;
                Ok(InsertOutcome::Inserted(id))
            }
            Err(err) => {
                savepoint.rollback().await?;
                Ok(InsertOutcome::Rejected(persistence_error(err)))
            }
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), Error> {
        self.tx.commit().await?;

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), Error> {
        self.tx.rollback().await?;

        Ok(())
    }
}
