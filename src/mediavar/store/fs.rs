use super::AssetStore;
use crate::error::{MediaError, Result};
use crate::model::Asset;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DATA_FILE: &str = "data.json";

/// Asset records kept in `{root}/data.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(MediaError::Io)?;
        }
        Ok(())
    }

    fn load_records(&self) -> Result<HashMap<Uuid, Asset>> {
        let data_file = self.root.join(DATA_FILE);
        if !data_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(data_file).map_err(MediaError::Io)?;
        let records: HashMap<Uuid, Asset> =
            serde_json::from_str(&content).map_err(MediaError::Serialization)?;
        Ok(records)
    }

    fn save_records(&self, records: &HashMap<Uuid, Asset>) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(records).map_err(MediaError::Serialization)?;

        // Atomic write for the index
        let tmp_file = self.root.join(format!(".data-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(MediaError::Io)?;
        fs::rename(&tmp_file, self.root.join(DATA_FILE)).map_err(MediaError::Io)?;
        Ok(())
    }
}

impl AssetStore for FileStore {
    fn save_asset(&mut self, asset: &Asset) -> Result<()> {
        let mut records = self.load_records()?;
        records.insert(asset.id, asset.clone());
        self.save_records(&records)
    }

    fn get_asset(&self, id: &Uuid) -> Result<Asset> {
        let records = self.load_records()?;
        records.get(id).cloned().ok_or(MediaError::AssetNotFound(*id))
    }

    fn list_assets(&self) -> Result<Vec<Asset>> {
        let mut assets: Vec<Asset> = self.load_records()?.into_values().collect();
        assets.sort_by_key(|a| a.created_at);
        Ok(assets)
    }

    fn delete_asset(&mut self, id: &Uuid) -> Result<()> {
        let mut records = self.load_records()?;
        if records.remove(id).is_none() {
            return Err(MediaError::AssetNotFound(*id));
        }
        self.save_records(&records)
    }
}
