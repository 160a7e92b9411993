use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use sitestock_inventory::{CellValue, RawRow};

use super::{ImportError, ImportParser};

/// Reads xlsx/xlsm/xlsb/xls/ods workbooks (format auto-detected).
///
/// Only the first worksheet is read. Columns with a blank header are ignored,
/// as are rows with no non-blank cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetParser;

impl SpreadsheetParser {
    pub fn new() -> Self {
        Self
    }
}

fn header_string(cell: &Data) -> Option<String> {
    let header = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(v) => format!("{v}"),
        Data::Int(v) => format!("{v}"),
        Data::Bool(v) => v.to_string(),
        other => other.to_string(),
    };
    if header.is_empty() { None } else { Some(header) }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}

impl ImportParser for SpreadsheetParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<RawRow>, ImportError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| ImportError::Workbook(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        let first = sheet_names.first().ok_or(ImportError::NoWorksheet)?.clone();

        let range = workbook
            .worksheet_range(&first)
            .map_err(|e| ImportError::Workbook(e.to_string()))?;

        let mut rows = range.rows();
        let headers: Vec<Option<String>> = match rows.next() {
            Some(header_row) => header_row.iter().map(header_string).collect(),
            None => {
                tracing::info!(sheet = %first, "worksheet is empty");
                return Ok(Vec::new());
            }
        };

        let parsed: Vec<RawRow> = rows
            .map(|cells| {
                headers
                    .iter()
                    .zip(cells.iter())
                    .filter_map(|(header, cell)| {
                        let header = header.as_ref()?;
                        match cell {
                            Data::Empty => None,
                            cell => Some((header.clone(), cell_value(cell))),
                        }
                    })
                    .collect::<RawRow>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        tracing::info!(sheet = %first, rows = parsed.len(), "worksheet parsed");
        Ok(parsed)
    }
}
