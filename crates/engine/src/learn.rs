use pigeonhole_core::{KeywordRepository, KeywordStore, StoreError, Transaction};

/// Records a manual relabel: the transaction keeps its new category and its
/// raw detail text becomes a keyword under that category, so the next run
/// picks up the same merchant automatically. Persists only when the store
/// actually changed; repeating an identical correction is a no-op.
///
/// The rest of the batch is untouched. Callers re-run the matcher when they
/// want the correction reflected across the session.
pub fn learn_correction(
    store: &mut KeywordStore,
    repository: &dyn KeywordRepository,
    transaction: &mut Transaction,
    new_category: &str,
) -> Result<bool, StoreError> {
    transaction.category = new_category.to_string();
    if !store.add_keyword(new_category, &transaction.detail) {
        return Ok(false);
    }
    repository.save(store)?;
    tracing::debug!(category = new_category, "learned keyword from correction");
    Ok(true)
}

/// Creates an empty category, persisting on actual creation.
pub fn create_category(
    store: &mut KeywordStore,
    repository: &dyn KeywordRepository,
    name: &str,
) -> Result<bool, StoreError> {
    if !store.add_category(name) {
        return Ok(false);
    }
    repository.save(store)?;
    Ok(true)
}
