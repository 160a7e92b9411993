use serde::{Deserialize, Serialize};

use sitestock_core::{DomainError, DomainResult, MaterialId, Quantity};

use crate::material::{Material, MaterialInput};

/// Direction of a quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityAction {
    /// Material consumed on site.
    Decrease,
    /// Stock delivered against the outstanding requirement.
    Increase,
}

impl QuantityAction {
    /// Legal `[min, max]` range for an adjustment amount on `material`.
    ///
    /// Advisory for callers presenting the action; the store enforces the lower
    /// bound and re-derives the caps itself.
    pub fn bounds(&self, material: &Material) -> (Quantity, Quantity) {
        match self {
            QuantityAction::Decrease => (Quantity::ZERO, material.site_quantity),
            QuantityAction::Increase => (Quantity::ZERO, material.required_quantity),
        }
    }
}

impl core::fmt::Display for QuantityAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            QuantityAction::Decrease => f.write_str("decrease"),
            QuantityAction::Increase => f.write_str("increase"),
        }
    }
}

/// Authoritative, ordered collection of materials.
///
/// Insertion order is display order. Every operation runs to completion on
/// `&mut self`; a failed operation leaves the collection untouched.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    materials: Vec<Material>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from previously persisted records, keeping their order.
    pub fn from_materials(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn get(&self, id: &MaterialId) -> Option<&Material> {
        self.materials.iter().find(|m| m.id() == id)
    }

    /// Materials whose site quantity is under their reorder threshold.
    pub fn below_threshold(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter().filter(|m| m.status().needs_reorder())
    }

    fn get_mut(&mut self, id: &MaterialId) -> DomainResult<&mut Material> {
        self.materials
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or(DomainError::NotFound)
    }

    /// Append a new material with a freshly generated id.
    pub fn add(&mut self, input: MaterialInput) -> Material {
        let mut id = MaterialId::new();
        while self.get(&id).is_some() {
            id = MaterialId::new();
        }

        let material = Material::new(id, input);
        tracing::debug!(material_id = %material.id(), name = %material.name, "material added");
        self.materials.push(material.clone());
        material
    }

    /// Replace every mutable field of `id`, keeping the id.
    pub fn edit(&mut self, id: &MaterialId, input: MaterialInput) -> DomainResult<Material> {
        let material = self.get_mut(id)?;
        material.replace(input);
        tracing::debug!(material_id = %id, "material edited");
        Ok(material.clone())
    }

    /// Remove `id` unconditionally and return the removed record.
    pub fn delete(&mut self, id: &MaterialId) -> DomainResult<Material> {
        let idx = self
            .materials
            .iter()
            .position(|m| m.id() == id)
            .ok_or(DomainError::NotFound)?;
        let removed = self.materials.remove(idx);
        tracing::debug!(material_id = %id, "material deleted");
        Ok(removed)
    }

    /// Apply a consumption or a delivery to `id`.
    ///
    /// - `Decrease`: `site := max(0, site - amount)`; `required` is untouched.
    /// - `Increase`: `applied := min(amount, required)`, then `site += applied`
    ///   and `required -= applied`. The sum `site + required` is conserved.
    pub fn adjust_quantity(
        &mut self,
        id: &MaterialId,
        action: QuantityAction,
        amount: f64,
    ) -> DomainResult<Material> {
        if !amount.is_finite() {
            return Err(DomainError::invalid_amount(format!(
                "amount must be a finite number (got {amount})"
            )));
        }
        if amount < 0.0 {
            return Err(DomainError::invalid_amount(format!(
                "amount cannot be negative (got {amount})"
            )));
        }
        let amount = Quantity::clamped(amount);

        let material = self.get_mut(id)?;
        match action {
            QuantityAction::Decrease => {
                material.site_quantity = material.site_quantity.saturating_sub(amount);
            }
            QuantityAction::Increase => {
                let applied = amount.min(material.required_quantity);
                material.site_quantity = material.site_quantity + applied;
                material.required_quantity = material.required_quantity.saturating_sub(applied);
            }
        }

        tracing::debug!(
            material_id = %id,
            %action,
            amount = amount.value(),
            site_quantity = material.site_quantity.value(),
            required_quantity = material.required_quantity.value(),
            "quantity adjusted"
        );
        Ok(material.clone())
    }

    /// Add every input in order. There is no rollback across the batch.
    pub fn import_batch(&mut self, inputs: Vec<MaterialInput>) -> Vec<Material> {
        let created: Vec<Material> = inputs.into_iter().map(|input| self.add(input)).collect();
        tracing::info!(count = created.len(), "materials imported");
        created
    }
}
