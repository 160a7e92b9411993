//! The owned inventory session handed to the presentation layer.
//!
//! `InventorySession` owns the one `InventoryStore`, loads it once from storage
//! and writes the full collection back after every successful mutation. Saves
//! are best-effort: a failed save is logged and remembered, but the in-memory
//! change stands.

use std::path::Path;

use sitestock_core::{DomainError, MaterialId};
use sitestock_infra::{
    ImportError, ImportParser, PersistenceAdapter, PersistenceError, SpreadsheetParser,
};
use sitestock_inventory::{
    InventoryStore, Material, MaterialInput, QuantityAction, RawRow, normalize_rows,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("import failed: {0}")]
    Import(#[from] ImportError),
}

pub struct InventorySession<P> {
    store: InventoryStore,
    persistence: P,
    parser: Box<dyn ImportParser + Send + Sync>,
    last_save_error: Option<String>,
}

impl<P> std::fmt::Debug for InventorySession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventorySession")
            .field("materials", &self.store.len())
            .field("last_save_error", &self.last_save_error)
            .finish_non_exhaustive()
    }
}

impl<P: PersistenceAdapter> InventorySession<P> {
    /// Load the stored collection and start a session over it.
    ///
    /// A load failure is returned rather than replaced with an empty store, so
    /// unreadable data is never overwritten by the first save.
    pub fn open(persistence: P) -> Result<Self, PersistenceError> {
        let materials = persistence.load()?;
        tracing::info!(count = materials.len(), "inventory loaded");
        Ok(Self {
            store: InventoryStore::from_materials(materials),
            persistence,
            parser: Box::new(SpreadsheetParser::new()),
            last_save_error: None,
        })
    }

    /// Replace the spreadsheet parser (e.g. for another file format).
    pub fn with_parser(mut self, parser: impl ImportParser + Send + Sync + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn materials(&self) -> &[Material] {
        self.store.materials()
    }

    pub fn get(&self, id: &MaterialId) -> Option<&Material> {
        self.store.get(id)
    }

    /// Message of the most recent failed save, cleared by the next good one.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    fn persist(&mut self) {
        match self.persistence.save(self.store.materials()) {
            Ok(()) => self.last_save_error = None,
            Err(err) => {
                tracing::error!(error = %err, "failed to save materials; keeping in-memory state");
                self.last_save_error = Some(err.to_string());
            }
        }
    }

    pub fn add(&mut self, input: MaterialInput) -> Material {
        let material = self.store.add(input);
        self.persist();
        material
    }

    pub fn edit(&mut self, id: &MaterialId, input: MaterialInput) -> Result<Material, SessionError> {
        let material = self.store.edit(id, input)?;
        self.persist();
        Ok(material)
    }

    /// Delete without further confirmation; asking the user is the caller's job.
    pub fn delete(&mut self, id: &MaterialId) -> Result<Material, SessionError> {
        let removed = self.store.delete(id)?;
        self.persist();
        Ok(removed)
    }

    pub fn adjust_quantity(
        &mut self,
        id: &MaterialId,
        action: QuantityAction,
        amount: f64,
    ) -> Result<Material, SessionError> {
        let material = self.store.adjust_quantity(id, action, amount)?;
        self.persist();
        Ok(material)
    }

    /// Normalize already-parsed rows and add them in order.
    pub fn import_rows(&mut self, rows: &[RawRow]) -> Vec<Material> {
        let created = self.store.import_batch(normalize_rows(rows));
        if !created.is_empty() {
            self.persist();
        }
        created
    }

    /// Parse `bytes` and import every row. Nothing is added if parsing fails.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<Vec<Material>, SessionError> {
        let rows = self.parser.parse(bytes)?;
        Ok(self.import_rows(&rows))
    }

    /// Read `path` in one go, then import as [`import_bytes`](Self::import_bytes).
    pub fn import_file(&mut self, path: &Path) -> Result<Vec<Material>, SessionError> {
        let rows = self.parser.parse_file(path).inspect_err(|err| {
            tracing::warn!(path = ?path, error = %err, "spreadsheet import failed");
        })?;
        Ok(self.import_rows(&rows))
    }
}
