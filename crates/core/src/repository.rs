use std::path::PathBuf;

use thiserror::Error;

use super::keywords::KeywordStore;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The persisted file exists but is not a valid store document. Never
    /// swallowed: silently resetting would destroy the user's accumulated
    /// keyword history.
    #[error("keyword store {} is not a valid store document: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode keyword store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistence seam for the keyword dictionary. Implementations decide where
/// the store lives; callers decide when to `save` (after every effective
/// mutation).
pub trait KeywordRepository {
    /// Reads the persisted store, or the default store when no persisted
    /// state exists.
    fn load(&self) -> Result<KeywordStore, StoreError>;

    /// Overwrites the persisted store. Best-effort durability: on failure
    /// the in-memory store stays usable for the session.
    fn save(&self, store: &KeywordStore) -> Result<(), StoreError>;
}
