//! Infrastructure layer: durable storage and spreadsheet decoding.

pub mod import;
pub mod persistence;

pub use import::{ImportError, ImportParser, SpreadsheetParser};
pub use persistence::{
    InMemoryPersistence, JsonFilePersistence, PersistenceAdapter, PersistenceError,
    STORAGE_KEY, SqlitePersistence,
};
