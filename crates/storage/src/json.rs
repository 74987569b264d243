use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use pigeonhole_core::{KeywordRepository, KeywordStore, StoreError};

/// Durable repository backed by a single JSON document. One process owns the
/// file for its lifetime; concurrent writers are unsupported (last writer
/// wins).
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileRepository { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeywordRepository for JsonFileRepository {
    fn load(&self) -> Result<KeywordStore, StoreError> {
        if !self.path.exists() {
            tracing::debug!("no store at {}, starting with defaults", self.path.display());
            return Ok(KeywordStore::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, store: &KeywordStore) -> Result<(), StoreError> {
        // Pretty-printed so the dictionary stays hand-editable.
        let document = serde_json::to_string_pretty(store)?;
        fs::write(&self.path, document)?;
        tracing::debug!("saved {} categories to {}", store.len(), self.path.display());
        Ok(())
    }
}

/// In-memory repository for tests and for callers that bring their own
/// persistence. `RefCell` is enough under the single-threaded model.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    saved: RefCell<Option<KeywordStore>>,
    saves: RefCell<usize>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: KeywordStore) -> Self {
        MemoryRepository {
            saved: RefCell::new(Some(store)),
            saves: RefCell::new(0),
        }
    }

    /// The store most recently passed to `save`, if any.
    pub fn saved(&self) -> Option<KeywordStore> {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl KeywordRepository for MemoryRepository {
    fn load(&self) -> Result<KeywordStore, StoreError> {
        Ok(self.saved.borrow().clone().unwrap_or_default())
    }

    fn save(&self, store: &KeywordStore) -> Result<(), StoreError> {
        *self.saved.borrow_mut() = Some(store.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
