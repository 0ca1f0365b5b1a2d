use crate::{
    db::{InsertOutcome, Store},
    entities::Place,
    error::Error,
};

/// Inserts `places` in one transaction and returns how many were stored.
///
/// A place the store rejects is logged and skipped; the rest of the batch is
/// still committed. Failing to open the transaction, to run an insert at all,
/// or to commit fails the whole batch and nothing is kept.
#[tracing::instrument(skip_all, fields(records = places.len()))]
pub async fn save_places(store: &dyn Store, places: &[Place]) -> Result<usize, Error> {
    if places.is_empty() {
        return Ok(0);
    }

    let mut tx = store.begin().await?;
    let mut saved = 0;

    for (index, place) in places.iter().enumerate() {
        match tx.insert(place).await {
            Ok(InsertOutcome::Inserted(_)) => saved += 1,
            Ok(InsertOutcome::Rejected(err)) => {
                tracing::warn!(
                    index,
                    place_id = ?place.place_id(),
                    error = %err,
                    "failed to save place"
                );
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "rollback failed");
                }
                return Err(err);
            }
        }
    }

    tx.commit().await?;

    tracing::info!(saved, "batch committed");

    Ok(saved)
}
