//! Commands for frontend integration.
//!
//! Each function maps one user action onto the session and reports failures as
//! display strings, ready to be shown inline next to the field or dialog that
//! triggered them.

use std::path::Path;

use sitestock_core::{DomainError, MaterialId};
use sitestock_infra::PersistenceAdapter;
use sitestock_inventory::{MaterialInput, QuantityAction};

use crate::session::{InventorySession, SessionError};
use crate::types::{ImportSummary, MaterialForm, MaterialView};

const IMPORT_FAILED: &str =
    "Error importing spreadsheet. Please check the file format and try again.";

fn parse_id(id: &str) -> Result<MaterialId, String> {
    id.parse::<MaterialId>()
        .map_err(|e| format!("Invalid material id: {e}"))
}

fn user_message(err: SessionError) -> String {
    match err {
        SessionError::Domain(DomainError::NotFound) => "Material not found".to_string(),
        SessionError::Domain(DomainError::Validation(msg)) => msg,
        SessionError::Domain(DomainError::InvalidAmount(msg)) => format!("Invalid quantity: {msg}"),
        SessionError::Domain(other) => other.to_string(),
        SessionError::Import(e) => format!("{IMPORT_FAILED} ({e})"),
    }
}

fn form_input(form: &MaterialForm) -> Result<MaterialInput, String> {
    MaterialInput::from_form(
        &form.name,
        form.required_quantity,
        form.site_quantity,
        form.threshold,
    )
    .map_err(|e| user_message(e.into()))
}

/// All materials in display order, each with its current status.
pub fn list_materials<P: PersistenceAdapter>(session: &InventorySession<P>) -> Vec<MaterialView> {
    session.materials().iter().map(MaterialView::from).collect()
}

/// Materials that need reordering.
pub fn list_below_threshold<P: PersistenceAdapter>(
    session: &InventorySession<P>,
) -> Vec<MaterialView> {
    session
        .store()
        .below_threshold()
        .map(MaterialView::from)
        .collect()
}

pub fn add_material<P: PersistenceAdapter>(
    session: &mut InventorySession<P>,
    form: MaterialForm,
) -> Result<MaterialView, String> {
    let input = form_input(&form)?;
    let material = session.add(input);
    tracing::info!(material_id = %material.id(), "material added");
    Ok(MaterialView::from(&material))
}

pub fn edit_material<P: PersistenceAdapter>(
    session: &mut InventorySession<P>,
    id: &str,
    form: MaterialForm,
) -> Result<MaterialView, String> {
    let id = parse_id(id)?;
    let input = form_input(&form)?;
    let material = session.edit(&id, input).map_err(user_message)?;
    Ok(MaterialView::from(&material))
}

/// Delete a material. The caller must have confirmed with the user already.
pub fn delete_material<P: PersistenceAdapter>(
    session: &mut InventorySession<P>,
    id: &str,
) -> Result<(), String> {
    let id = parse_id(id)?;
    let removed = session.delete(&id).map_err(user_message)?;
    tracing::info!(material_id = %removed.id(), name = %removed.name, "material deleted");
    Ok(())
}

/// Check `amount` against the legal range for `action` before applying it.
///
/// The store clamps over-large amounts on its own; this rejects them instead so
/// the user sees why nothing beyond the limit was applied.
pub fn check_adjustment<P: PersistenceAdapter>(
    session: &InventorySession<P>,
    id: &str,
    action: QuantityAction,
    amount: f64,
) -> Result<(), String> {
    let id = parse_id(id)?;
    let material = session
        .get(&id)
        .ok_or_else(|| "Material not found".to_string())?;

    if !amount.is_finite() || amount < 0.0 {
        return Err("Quantity must be a number of at least 0".to_string());
    }

    let (_, max) = action.bounds(material);
    if amount > max.value() {
        return Err(match action {
            QuantityAction::Decrease => {
                format!("Cannot reduce more than the available quantity ({max})")
            }
            QuantityAction::Increase => {
                format!("Cannot add more than the required quantity ({max})")
            }
        });
    }
    Ok(())
}

/// Record usage (`Decrease`) or a delivery (`Increase`).
pub fn adjust_quantity<P: PersistenceAdapter>(
    session: &mut InventorySession<P>,
    id: &str,
    action: QuantityAction,
    amount: f64,
) -> Result<MaterialView, String> {
    check_adjustment(session, id, action, amount)?;
    let id = parse_id(id)?;
    let material = session
        .adjust_quantity(&id, action, amount)
        .map_err(user_message)?;
    Ok(MaterialView::from(&material))
}

/// Import every row of the first worksheet of the file at `path`.
pub fn import_spreadsheet<P: PersistenceAdapter>(
    session: &mut InventorySession<P>,
    path: &str,
) -> Result<ImportSummary, String> {
    let created = session
        .import_file(Path::new(path))
        .map_err(user_message)?;

    let materials: Vec<MaterialView> = created.iter().map(MaterialView::from).collect();
    Ok(ImportSummary {
        imported: materials.len(),
        unnamed: materials.iter().filter(|m| m.name.is_empty()).count(),
        materials,
    })
}
