//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor an explicit filter is given:
/// the workspace crates at `info`, dependencies (sqlx, calamine) at `warn`.
pub const DEFAULT_FILTER: &str = "warn,sitestock_core=info,sitestock_inventory=info,sitestock_infra=info,sitestock_desktop=info";

/// The filter `init` would install: `RUST_LOG` if set and valid, otherwise [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Parse `directives`, falling back to [`DEFAULT_FILTER`] when they do not parse.
pub fn filter_from(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing/logging for the process from `RUST_LOG`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    install(env_filter());
}

/// Initialize with an explicit filter directive (e.g. `"sitestock_inventory=debug"`).
pub fn init_with_filter(directives: &str) {
    install(filter_from(directives));
}

// One JSON object per line; event fields sit at the top level.
fn install(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_target(true)
        .with_env_filter(filter)
        .try_init();
}
