//! Desktop configuration, read from the environment.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `SITESTOCK_DATA_DIR` | directory holding the storage file | `{os data dir}/sitestock` |
//! | `SITESTOCK_STORAGE` | `json` or `sqlite` | `json` |
//! | `SITESTOCK_LOG` | tracing filter directives | `RUST_LOG`, then `sitestock_*` crates at `info` |

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sitestock_infra::{JsonFilePersistence, PersistenceAdapter, SqlitePersistence};

pub const DATA_DIR_VAR: &str = "SITESTOCK_DATA_DIR";
pub const STORAGE_VAR: &str = "SITESTOCK_STORAGE";
pub const LOG_VAR: &str = "SITESTOCK_LOG";

/// Which durable storage adapter to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => anyhow::bail!("unknown storage backend {other:?} (expected json or sqlite)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub log_filter: Option<String>,
}

impl DesktopConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (environment-like key → value).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match non_empty(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let storage = match non_empty(STORAGE_VAR) {
            Some(value) => value
                .parse::<StorageBackend>()
                .with_context(|| format!("invalid {STORAGE_VAR}"))?,
            None => StorageBackend::default(),
        };

        Ok(Self {
            data_dir,
            storage,
            log_filter: non_empty(LOG_VAR),
        })
    }

    /// Install the tracing subscriber according to `log_filter`.
    pub fn init_logging(&self) {
        match &self.log_filter {
            Some(filter) => sitestock_observability::init_with_filter(filter),
            None => sitestock_observability::init(),
        }
    }

    /// Build the configured storage adapter inside `data_dir`.
    pub fn open_persistence(&self) -> anyhow::Result<Box<dyn PersistenceAdapter>> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("failed to create data directory at {:?}", self.data_dir))?;

        let adapter: Box<dyn PersistenceAdapter> = match self.storage {
            StorageBackend::Json => Box::new(JsonFilePersistence::in_dir(&self.data_dir)),
            StorageBackend::Sqlite => Box::new(
                SqlitePersistence::in_dir(&self.data_dir)
                    .context("failed to set up SQLite storage")?,
            ),
        };
        tracing::info!(data_dir = ?self.data_dir, storage = ?self.storage, "storage configured");
        Ok(adapter)
    }
}

/// Resolve `{app_data_dir}/sitestock`.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    Ok(base.join("sitestock"))
}
