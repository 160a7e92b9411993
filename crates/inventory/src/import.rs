//! Spreadsheet row → `MaterialInput` mapping.
//!
//! Pure and file-format agnostic: parsers produce [`RawRow`]s, this module turns
//! them into inputs for [`InventoryStore::import_batch`](crate::InventoryStore::import_batch).
//! Rows are never rejected; missing or malformed fields degrade to `""` / `0`.

use serde::{Deserialize, Serialize};

use sitestock_core::Quantity;

use crate::material::MaterialInput;

/// A scalar cell value as read from a spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Absent, or text that is blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Bool(_) | CellValue::Number(_) => false,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.trim().to_string()),
            CellValue::Number(v) => Some(format!("{v}")),
            CellValue::Bool(v) => Some(v.to_string()),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(v) => Some(*v),
            CellValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// One spreadsheet row: header → cell, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    fields: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.push((key.into(), value.into()));
    }

    pub fn fields(&self) -> &[(String, CellValue)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_blank())
    }

    /// First non-blank value whose key matches `field` case-variantly.
    fn lookup(&self, field: &str) -> Option<&CellValue> {
        let wanted = normalize_key(field);
        self.fields
            .iter()
            .filter(|(k, _)| normalize_key(k) == wanted)
            .map(|(_, v)| v)
            .find(|v| !v.is_blank())
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Column keys recognized for each field (compared after [`normalize_key`]).
pub const NAME_KEY: &str = "name";
pub const REQUIRED_QUANTITY_KEY: &str = "requiredQuantity";
pub const SITE_QUANTITY_KEY: &str = "siteQuantity";
pub const THRESHOLD_KEY: &str = "threshold";

/// `"Required Quantity"`, `"requiredQuantity"` and `"required_quantity"` all
/// normalize to `"requiredquantity"`.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn quantity_field(row: &RawRow, field: &str) -> Quantity {
    row.lookup(field)
        .and_then(CellValue::as_number)
        .map(Quantity::clamped)
        .unwrap_or(Quantity::ZERO)
}

/// Map one raw row to a `MaterialInput`. Never fails.
pub fn normalize_row(row: &RawRow) -> MaterialInput {
    let name = row
        .lookup(NAME_KEY)
        .and_then(CellValue::as_text)
        .unwrap_or_default();

    MaterialInput {
        name,
        required_quantity: quantity_field(row, REQUIRED_QUANTITY_KEY),
        site_quantity: quantity_field(row, SITE_QUANTITY_KEY),
        threshold: quantity_field(row, THRESHOLD_KEY),
    }
}

/// Map every row, one input per row, order preserved.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<MaterialInput> {
    let inputs: Vec<MaterialInput> = rows.iter().map(normalize_row).collect();
    let unnamed = inputs.iter().filter(|i| i.name.is_empty()).count();
    if unnamed > 0 {
        tracing::warn!(unnamed, total = inputs.len(), "import rows without a name");
    }
    inputs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_zero() {
        let row = RawRow::new()
            .with("Name", "Cement")
            .with("Required Quantity", "200");

        assert_eq!(
            normalize_row(&row),
            MaterialInput::new("Cement", Quantity::from(200u32), Quantity::ZERO, Quantity::ZERO)
        );
    }

    #[test]
    fn camel_case_headers_are_recognized() {
        let row: RawRow = [
            ("name", CellValue::from("Sand")),
            ("requiredQuantity", CellValue::Number(12.5)),
            ("siteQuantity", CellValue::Number(3.0)),
            ("threshold", CellValue::Number(4.0)),
        ]
        .into_iter()
        .collect();

        let input = normalize_row(&row);
        assert_eq!(input.name, "Sand");
        assert_eq!(input.required_quantity.value(), 12.5);
        assert_eq!(input.site_quantity.value(), 3.0);
        assert_eq!(input.threshold.value(), 4.0);
    }

    #[test]
    fn header_matching_ignores_case_and_separators() {
        let row = RawRow::new()
            .with("NAME", "Steel")
            .with("required_quantity", 7.0)
            .with("Site-Quantity", 2.0)
            .with(" Threshold ", 1.0);

        let input = normalize_row(&row);
        assert_eq!(input.name, "Steel");
        assert_eq!(input.required_quantity.value(), 7.0);
        assert_eq!(input.site_quantity.value(), 2.0);
        assert_eq!(input.threshold.value(), 1.0);
    }

    #[test]
    fn first_non_blank_variant_wins() {
        let row = RawRow::new()
            .with("name", "  ")
            .with("Name", "Bricks")
            .with("threshold", CellValue::Empty)
            .with("Threshold", "15");

        let input = normalize_row(&row);
        assert_eq!(input.name, "Bricks");
        assert_eq!(input.threshold.value(), 15.0);
    }

    #[test]
    fn unparseable_and_negative_numbers_become_zero() {
        let row = RawRow::new()
            .with("Name", "Tiles")
            .with("Required Quantity", "lots")
            .with("Site Quantity", -4.0)
            .with("Threshold", CellValue::Bool(true));

        let input = normalize_row(&row);
        assert_eq!(input.required_quantity, Quantity::ZERO);
        assert_eq!(input.site_quantity, Quantity::ZERO);
        assert_eq!(input.threshold.value(), 1.0);
    }

    #[test]
    fn row_without_name_keeps_empty_name() {
        let row = RawRow::new().with("Required Quantity", " 40 ");

        let input = normalize_row(&row);
        assert_eq!(input.name, "");
        assert_eq!(input.required_quantity.value(), 40.0);
    }

    #[test]
    fn numeric_names_are_stringified() {
        let row = RawRow::new().with("Name", 42.0);
        assert_eq!(normalize_row(&row).name, "42");
    }

    #[test]
    fn every_row_produces_one_input() {
        let rows = vec![
            RawRow::new().with("Name", "A"),
            RawRow::new(),
            RawRow::new().with("garbage", "x"),
        ];

        let inputs = normalize_rows(&rows);
        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0].name, "A");
        assert_eq!(inputs[1], MaterialInput::default());
        assert_eq!(inputs[2], MaterialInput::default());
    }

    #[test]
    fn normalize_key_collapses_variants() {
        assert_eq!(normalize_key("Required Quantity"), "requiredquantity");
        assert_eq!(normalize_key("requiredQuantity"), "requiredquantity");
        assert_eq!(normalize_key("SITE_QUANTITY"), "sitequantity");
    }
}
