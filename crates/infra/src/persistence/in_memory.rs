use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use sitestock_inventory::Material;

use super::{PersistenceAdapter, PersistenceError};

/// In-memory storage.
///
/// Intended for tests/dev. Counts saves so callers can assert that every
/// mutation reached storage.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    stored: RwLock<Option<Vec<Material>>>,
    saves: AtomicUsize,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `materials` already stored.
    pub fn seeded(materials: Vec<Material>) -> Self {
        Self {
            stored: RwLock::new(Some(materials)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Current stored snapshot, if anything was stored.
    pub fn snapshot(&self) -> Option<Vec<Material>> {
        self.stored.read().ok().and_then(|s| s.clone())
    }
}

impl PersistenceAdapter for InMemoryPersistence {
    fn load(&self) -> Result<Vec<Material>, PersistenceError> {
        let guard = self
            .stored
            .read()
            .map_err(|_| PersistenceError::Runtime("lock poisoned".to_string()))?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, materials: &[Material]) -> Result<(), PersistenceError> {
        let mut guard = self
            .stored
            .write()
            .map_err(|_| PersistenceError::Runtime("lock poisoned".to_string()))?;
        *guard = Some(materials.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
