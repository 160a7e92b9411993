use std::path::{Path, PathBuf};

use chrono::Utc;
use sitestock_inventory::Material;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tokio::runtime::Runtime;
use tokio::sync::Mutex;

use super::{PersistenceAdapter, PersistenceError, STORAGE_KEY};

/// SQLite-backed key/value storage for the material collection.
///
/// The whole collection is stored as one JSON document in the `storage` table
/// under [`STORAGE_KEY`]. The public API is synchronous; queries run on a
/// private current-thread runtime. The pool is opened lazily on first use.
#[derive(Debug)]
pub struct SqlitePersistence {
    db_path: PathBuf,
    runtime: Runtime,
    pool: Mutex<Option<SqlitePool>>,
}

impl SqlitePersistence {
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| PersistenceError::Runtime(e.to_string()))?;

        Ok(Self {
            db_path: db_path.into(),
            runtime,
            pool: Mutex::new(None),
        })
    }

    /// Database file `sitestock.db` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        Self::new(dir.as_ref().join("sitestock.db"))
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open the pool and create the table (called lazily on first use).
    async fn get_pool(&self) -> Result<SqlitePool, PersistenceError> {
        let mut pool_guard = self.pool.lock().await;
        if let Some(pool) = pool_guard.as_ref() {
            return Ok(pool.clone());
        }

        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&self.db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS storage (
                key       TEXT PRIMARY KEY,
                data      TEXT NOT NULL,
                saved_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        tracing::debug!(path = ?self.db_path, "sqlite storage initialized");
        *pool_guard = Some(pool.clone());
        Ok(pool)
    }

    async fn load_async(&self) -> Result<Vec<Material>, PersistenceError> {
        let pool = self.get_pool().await?;

        let row = sqlx::query(
            r#"
            SELECT data
            FROM storage
            WHERE key = ?1
            "#,
        )
        .bind(STORAGE_KEY)
        .fetch_optional(&pool)
        .await?;

        let row = match row {
            Some(row) => row,
            None => return Ok(Vec::new()),
        };

        let data: String = row.try_get("data")?;
        Ok(serde_json::from_str(&data)?)
    }

    async fn save_async(&self, materials: &[Material]) -> Result<(), PersistenceError> {
        let pool = self.get_pool().await?;

        let payload = serde_json::to_string(materials)?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO storage (key, data, saved_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key)
            DO UPDATE SET
                data = excluded.data,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(STORAGE_KEY)
        .bind(&payload)
        .bind(&now)
        .execute(&pool)
        .await?;

        Ok(())
    }
}

impl PersistenceAdapter for SqlitePersistence {
    fn load(&self) -> Result<Vec<Material>, PersistenceError> {
        let materials = self.runtime.block_on(self.load_async())?;
        tracing::debug!(path = ?self.db_path, count = materials.len(), "materials loaded");
        Ok(materials)
    }

    fn save(&self, materials: &[Material]) -> Result<(), PersistenceError> {
        self.runtime.block_on(self.save_async(materials))?;
        tracing::debug!(path = ?self.db_path, count = materials.len(), "materials saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitestock_core::{MaterialId, Quantity};
    use sitestock_inventory::MaterialInput;

    fn material(name: &str, required: u32) -> Material {
        Material::new(
            MaterialId::new(),
            MaterialInput::new(name, required.into(), Quantity::ZERO, Quantity::ZERO),
        )
    }

    #[test]
    fn empty_database_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqlitePersistence::in_dir(dir.path()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_upserts_under_one_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqlitePersistence::in_dir(dir.path()).unwrap();

        store.save(&[material("Sand", 1), material("Gravel", 2)]).unwrap();
        let latest = vec![material("Steel", 3)];
        store.save(&latest).unwrap();

        assert_eq!(store.load().unwrap(), latest);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let saved = vec![material("Timber", 12)];

        {
            let store = SqlitePersistence::in_dir(dir.path()).unwrap();
            store.save(&saved).unwrap();
        }

        let reopened = SqlitePersistence::in_dir(dir.path()).unwrap();
        assert_eq!(reopened.load().unwrap(), saved);
    }
}
