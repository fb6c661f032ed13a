use super::AssetStore;
use crate::error::{MediaError, Result};
use crate::model::Asset;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory record store for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    assets: HashMap<Uuid, Asset>,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }
}

impl AssetStore for InMemoryStore {
    fn save_asset(&mut self, asset: &Asset) -> Result<()> {
        if self.simulate_write_error {
            return Err(MediaError::Store("Simulated write error".to_string()));
        }
        self.assets.insert(asset.id, asset.clone());
        Ok(())
    }

    fn get_asset(&self, id: &Uuid) -> Result<Asset> {
        self.assets
            .get(id)
            .cloned()
            .ok_or(MediaError::AssetNotFound(*id))
    }

    fn list_assets(&self) -> Result<Vec<Asset>> {
        let mut assets: Vec<Asset> = self.assets.values().cloned().collect();
        assets.sort_by_key(|a| a.created_at);
        Ok(assets)
    }

    fn delete_asset(&mut self, id: &Uuid) -> Result<()> {
        if self.assets.remove(id).is_none() {
            return Err(MediaError::AssetNotFound(*id));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::disk::memory::MemDisk;
    use crate::disk::Disk;
    use crate::manipulation_log::ManipulationLog;
    use crate::model::AssetKind;
    use crate::recipe::Recipe;

    /// An image asset at `foo/bar.jpg` on disk `tmp`, with its file seeded.
    pub struct MediaFixture {
        pub store: InMemoryStore,
        pub disk: MemDisk,
        pub asset: Asset,
    }

    impl Default for MediaFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MediaFixture {
        pub fn new() -> Self {
            let asset = Asset::new("tmp", "foo", "bar", "jpg", AssetKind::Image);
            let disk = MemDisk::new();
            disk.write(&asset.plain_path(), b"original").unwrap();
            let mut store = InMemoryStore::new();
            store.save_asset(&asset).unwrap();
            Self { store, disk, asset }
        }

        /// Seed a variant file for `recipe` and log it, like a real materialization.
        pub fn with_variant(self, recipe: &Recipe) -> Self {
            let path = self.asset.variant_path(recipe, true);
            self.disk.write(&path, recipe.canonical().as_bytes()).unwrap();
            ManipulationLog::new(&self.disk)
                .append(&self.asset, recipe)
                .unwrap();
            self
        }
    }
}
