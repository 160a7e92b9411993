//! `sitestock-desktop`
//!
//! **Responsibility:** application shell between the inventory domain and a UI.
//!
//! This crate provides:
//! - Environment-driven configuration (data directory, storage backend, logging)
//! - `InventorySession`: the owned store, loaded once and saved after every change
//! - Command functions and view models a presentation layer binds to
//!
//! Rendering, dialogs and file pickers are left to the embedding UI.

pub mod commands;
pub mod config;
pub mod session;
pub mod types;

pub use config::{DesktopConfig, StorageBackend};
pub use session::{InventorySession, SessionError};
pub use types::{ImportSummary, MaterialForm, MaterialView};

use sitestock_infra::PersistenceAdapter;

/// Read configuration, install logging and open a session over the configured storage.
pub fn bootstrap() -> anyhow::Result<InventorySession<Box<dyn PersistenceAdapter>>> {
    use anyhow::Context;

    let config = DesktopConfig::from_env().context("failed to read configuration")?;
    config.init_logging();
    open_session(&config)
}

/// Open a session with an explicit configuration.
pub fn open_session(
    config: &DesktopConfig,
) -> anyhow::Result<InventorySession<Box<dyn PersistenceAdapter>>> {
    use anyhow::Context;

    let persistence = config.open_persistence()?;
    InventorySession::open(persistence).context("failed to load stored materials")
}
