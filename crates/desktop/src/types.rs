//! Shapes exchanged with the presentation layer.

use serde::{Deserialize, Serialize};
use sitestock_inventory::{Material, StockStatus};

/// One table row: the stored fields plus the derived status badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialView {
    pub id: String,
    pub name: String,
    pub required_quantity: f64,
    pub site_quantity: f64,
    pub threshold: f64,
    pub status: StockStatus,
    pub status_label: String,
}

impl From<&Material> for MaterialView {
    fn from(material: &Material) -> Self {
        let status = material.status();
        Self {
            id: material.id().to_string(),
            name: material.name.clone(),
            required_quantity: material.required_quantity.value(),
            site_quantity: material.site_quantity.value(),
            threshold: material.threshold.value(),
            status,
            status_label: status.as_str().to_string(),
        }
    }
}

/// Add/edit form payload, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialForm {
    pub name: String,
    pub required_quantity: f64,
    pub site_quantity: f64,
    pub threshold: f64,
}

/// Outcome of one spreadsheet import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub unnamed: usize,
    pub materials: Vec<MaterialView>,
}
