//! Construction-site material inventory domain.
//!
//! This crate contains business rules for materials, implemented purely as
//! deterministic domain logic (no IO, no UI, no storage).

pub mod import;
pub mod material;
pub mod store;

pub use import::{CellValue, RawRow, normalize_row, normalize_rows};
pub use material::{Material, MaterialInput, StockStatus};
pub use store::{InventoryStore, QuantityAction};
