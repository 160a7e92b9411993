//! Spreadsheet import boundary: file bytes → raw rows.
//!
//! Parsing is all-or-nothing: on failure no rows are returned. Mapping rows to
//! material inputs lives in `sitestock_inventory::import`.

pub mod spreadsheet;

pub use spreadsheet::SpreadsheetParser;

use std::path::Path;

use sitestock_inventory::RawRow;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read import file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to open workbook: {0}")]
    Workbook(String),

    #[error("workbook has no worksheet")]
    NoWorksheet,
}

/// Decodes an import file into header-keyed rows.
pub trait ImportParser {
    /// Parse `bytes`; the first worksheet's header row becomes the keys.
    fn parse(&self, bytes: &[u8]) -> Result<Vec<RawRow>, ImportError>;

    /// One-shot read of `path` followed by [`parse`](Self::parse).
    fn parse_file(&self, path: &Path) -> Result<Vec<RawRow>, ImportError> {
        let bytes = std::fs::read(path)?;
        self.parse(&bytes)
    }
}
