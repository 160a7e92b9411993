//! Durable storage boundary for the material collection.
//!
//! The full collection is written under one fixed key on every change and read
//! back once at startup. There is no incremental diff.

pub mod in_memory;
pub mod json_file;
pub mod sqlite;

pub use in_memory::InMemoryPersistence;
pub use json_file::JsonFilePersistence;
pub use sqlite::SqlitePersistence;

use std::sync::Arc;

use sitestock_inventory::Material;
use thiserror::Error;

/// Storage key the collection is written under.
pub const STORAGE_KEY: &str = "constructionMaterials";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize materials: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage runtime unavailable: {0}")]
    Runtime(String),
}

/// Load/save of the whole material sequence.
pub trait PersistenceAdapter: Send + Sync {
    /// Previously saved materials, or an empty vec if nothing was stored yet.
    fn load(&self) -> Result<Vec<Material>, PersistenceError>;

    /// Overwrite the stored collection with `materials`.
    fn save(&self, materials: &[Material]) -> Result<(), PersistenceError>;
}

impl<T> PersistenceAdapter for Arc<T>
where
    T: PersistenceAdapter + ?Sized,
{
    fn load(&self) -> Result<Vec<Material>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, materials: &[Material]) -> Result<(), PersistenceError> {
        (**self).save(materials)
    }
}

impl<T> PersistenceAdapter for Box<T>
where
    T: PersistenceAdapter + ?Sized,
{
    fn load(&self) -> Result<Vec<Material>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, materials: &[Material]) -> Result<(), PersistenceError> {
        (**self).save(materials)
    }
}
