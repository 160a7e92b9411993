use serde::{Deserialize, Serialize};

use sitestock_core::{DomainError, DomainResult, MaterialId, Quantity};

/// Derived stock status. Computed on read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    BelowThreshold,
    Adequate,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::BelowThreshold => "Below Threshold",
            StockStatus::Adequate => "Adequate",
        }
    }

    pub fn needs_reorder(&self) -> bool {
        *self == StockStatus::BelowThreshold
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable subset of a material, used as the payload for add/edit/import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialInput {
    pub name: String,
    pub required_quantity: Quantity,
    pub site_quantity: Quantity,
    pub threshold: Quantity,
}

impl MaterialInput {
    pub fn new(
        name: impl Into<String>,
        required_quantity: Quantity,
        site_quantity: Quantity,
        threshold: Quantity,
    ) -> Self {
        Self {
            name: name.into(),
            required_quantity,
            site_quantity,
            threshold,
        }
    }

    /// Build an input from raw form fields.
    ///
    /// Forms require a non-empty name and non-negative finite numbers; the
    /// error names the offending field so it can be shown inline.
    pub fn from_form(
        name: &str,
        required_quantity: f64,
        site_quantity: f64,
        threshold: f64,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            required_quantity: form_quantity("requiredQuantity", required_quantity)?,
            site_quantity: form_quantity("siteQuantity", site_quantity)?,
            threshold: form_quantity("threshold", threshold)?,
        })
    }
}

fn form_quantity(field: &str, value: f64) -> DomainResult<Quantity> {
    Quantity::new(value).map_err(|e| match e {
        DomainError::Validation(msg) => DomainError::validation(format!("{field}: {msg}")),
        other => other,
    })
}

/// One inventory line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    id: MaterialId,
    pub name: String,
    pub required_quantity: Quantity,
    pub site_quantity: Quantity,
    pub threshold: Quantity,
}

impl Material {
    pub fn new(id: MaterialId, input: MaterialInput) -> Self {
        Self {
            id,
            name: input.name,
            required_quantity: input.required_quantity,
            site_quantity: input.site_quantity,
            threshold: input.threshold,
        }
    }

    pub fn id(&self) -> &MaterialId {
        &self.id
    }

    /// Below threshold iff `site_quantity < threshold`.
    pub fn status(&self) -> StockStatus {
        if self.site_quantity < self.threshold {
            StockStatus::BelowThreshold
        } else {
            StockStatus::Adequate
        }
    }

    /// Copy of the mutable fields.
    pub fn input(&self) -> MaterialInput {
        MaterialInput {
            name: self.name.clone(),
            required_quantity: self.required_quantity,
            site_quantity: self.site_quantity,
            threshold: self.threshold,
        }
    }

    /// Overwrite every mutable field; the id is untouched.
    pub(crate) fn replace(&mut self, input: MaterialInput) {
        self.name = input.name;
        self.required_quantity = input.required_quantity;
        self.site_quantity = input.site_quantity;
        self.threshold = input.threshold;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(site: u32, threshold: u32) -> Material {
        Material::new(
            MaterialId::new(),
            MaterialInput::new("Rebar", Quantity::from(0u32), site.into(), threshold.into()),
        )
    }

    #[test]
    fn status_is_below_threshold_only_when_site_is_strictly_less() {
        assert_eq!(material(49, 50).status(), StockStatus::BelowThreshold);
        assert_eq!(material(50, 50).status(), StockStatus::Adequate);
        assert_eq!(material(0, 0).status(), StockStatus::Adequate);
    }

    #[test]
    fn status_labels_match_table_badges() {
        assert_eq!(StockStatus::BelowThreshold.to_string(), "Below Threshold");
        assert_eq!(StockStatus::Adequate.to_string(), "Adequate");
    }

    #[test]
    fn from_form_rejects_blank_name() {
        let err = MaterialInput::from_form("   ", 1.0, 1.0, 1.0).unwrap_err();
        assert_eq!(err, DomainError::validation("name cannot be empty"));
    }

    #[test]
    fn from_form_names_the_bad_field() {
        let err = MaterialInput::from_form("Sand", 1.0, -2.0, 1.0).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.starts_with("siteQuantity:"), "{msg}"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn from_form_trims_name() {
        let input = MaterialInput::from_form("  Gravel ", 10.0, 2.0, 5.0).unwrap();
        assert_eq!(input.name, "Gravel");
        assert_eq!(input.required_quantity.value(), 10.0);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let m = material(20, 50);
        let json = serde_json::to_value(&m).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["id", "name", "requiredQuantity", "siteQuantity", "threshold"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert!(!obj.contains_key("status"));
    }

    #[test]
    fn deserializes_legacy_record() {
        let json = r#"{"id":"1712345678901","name":"Cement","requiredQuantity":100,"siteQuantity":20,"threshold":50}"#;
        let m: Material = serde_json::from_str(json).unwrap();
        assert_eq!(m.id().as_str(), "1712345678901");
        assert_eq!(m.required_quantity.value(), 100.0);
        assert_eq!(m.status(), StockStatus::BelowThreshold);
    }
}
