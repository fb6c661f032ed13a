//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for mediavar operations, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (canonical recipe strings -> [`Recipe`], selectors -> assets)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It holds the record store, the configured disks and the loaded config, and
//! threads the relevant config values (missing-variant policy, log dedupe,
//! manipulation toggle) into each command explicitly.
//!
//! ## Generic Over AssetStore
//!
//! `MediaApi<S: AssetStore>` is generic over the record store:
//! - Production: `MediaApi<FileStore>`
//! - Testing: `MediaApi<InMemoryStore>`

use crate::canonical;
use crate::commands;
use crate::config::MediaConfig;
use crate::disk::DiskSet;
use crate::error::Result;
use crate::materialize::{Materialized, Materializer, Transformer};
use crate::model::AssetKind;
use crate::recipe::Recipe;
use crate::store::AssetStore;

pub struct MediaApi<S: AssetStore> {
    store: S,
    disks: DiskSet,
    config: MediaConfig,
    paths: commands::MediaPaths,
}

impl<S: AssetStore> MediaApi<S> {
    pub fn new(store: S, disks: DiskSet, config: MediaConfig, paths: commands::MediaPaths) -> Self {
        Self {
            store,
            disks,
            config,
            paths,
        }
    }

    pub fn add_asset(
        &mut self,
        disk: Option<&str>,
        path: &str,
        kind: Option<AssetKind>,
    ) -> Result<commands::CmdResult> {
        let disk = disk.unwrap_or(&self.config.default_disk).to_string();
        commands::add::run(&mut self.store, &self.disks, &disk, path, kind)
    }

    pub fn list_assets(&self, disk: Option<&str>) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, disk)
    }

    pub fn move_asset(
        &mut self,
        selector: &str,
        directory: &str,
        filename: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::move_asset::run(
            &mut self.store,
            &self.disks,
            &self.config,
            selector,
            directory,
            filename,
        )
    }

    pub fn asset_files(&self, selector: &str) -> Result<commands::CmdResult> {
        commands::paths::run(&self.store, &self.disks, selector)
    }

    /// Path of the variant a canonical recipe string names.
    pub fn variant_path(&self, selector: &str, recipe: &str) -> Result<commands::CmdResult> {
        let recipe = canonical::parse(recipe)?;
        commands::paths::resolve(&self.store, &self.disks, &self.config, selector, recipe)
    }

    pub fn history(&self, selector: &str) -> Result<commands::CmdResult> {
        commands::history::run(&self.store, &self.disks, selector)
    }

    pub fn record_variant(
        &self,
        selector: &str,
        recipe: &str,
        strict: bool,
    ) -> Result<commands::CmdResult> {
        let recipe = canonical::parse(recipe)?;
        commands::record::run(
            &self.store,
            &self.disks,
            &self.config,
            selector,
            &recipe,
            strict,
        )
    }

    pub fn purge_variants(&self, selector: &str) -> Result<commands::CmdResult> {
        commands::purge::run(&self.store, &self.disks, selector)
    }

    /// Produce and log variants with an external transformation engine.
    pub fn materialize(
        &self,
        selector: &str,
        recipes: &[Recipe],
        transformer: &dyn Transformer,
    ) -> Result<Vec<Materialized>> {
        let asset = commands::helpers::resolve_asset(&self.store, selector)?;
        let disk = self.disks.get(&asset.disk)?;
        Materializer::new(disk)
            .with_manipulation(self.config.manipulation_enabled)
            .with_dedupe(self.config.dedupe_log)
            .apply_all(&asset, recipes, transformer)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::MediaPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{AssetFile, CmdMessage, CmdResult, MediaPaths, MessageLevel};
