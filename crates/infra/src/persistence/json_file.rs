use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sitestock_inventory::Material;

use super::{PersistenceAdapter, PersistenceError, STORAGE_KEY};

/// JSON file storage: `{dir}/constructionMaterials.json`.
///
/// The file holds a plain JSON array of materials. Writes go to a sibling
/// temp file first and are renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage file inside `dir`, named after the storage key.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceAdapter for JsonFilePersistence {
    fn load(&self) -> Result<Vec<Material>, PersistenceError> {
        if !self.path.exists() {
            tracing::debug!(path = ?self.path, "no stored materials yet");
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        let materials: Vec<Material> = serde_json::from_str(&data)?;
        tracing::debug!(path = ?self.path, count = materials.len(), "materials loaded");
        Ok(materials)
    }

    fn save(&self, materials: &[Material]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_vec(materials)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&payload)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = ?self.path, count = materials.len(), "materials saved");
        Ok(())
    }
}
