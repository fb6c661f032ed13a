//! # Manipulation Log
//!
//! Every recipe that has been materialized as a variant file is appended to a
//! JSON sidecar next to the asset's original:
//!
//! ```text
//! foo/bar.jpg.json
//! [{"resize":[250,250]},{"colorize":[250,250,250],"resize":[250,250]}]
//! ```
//!
//! The log is what a move replays to find the variants, so variant files never
//! have to be discovered by listing directories.
//!
//! ## Crash Window
//!
//! `append` is read-modify-write with no lock. A crash between the read and the
//! write loses the entry being appended; earlier history survives because the
//! disk write replaces the whole document (`FsDisk` does this with a rename).
//! Callers must not append to the same asset concurrently.

use crate::disk::Disk;
use crate::error::{MediaError, Result};
use crate::model::Asset;
use crate::recipe::Recipe;
use tracing::debug;

pub struct ManipulationLog<'a> {
    disk: &'a dyn Disk,
    dedupe: bool,
}

impl<'a> ManipulationLog<'a> {
    pub fn new(disk: &'a dyn Disk) -> Self {
        Self {
            disk,
            dedupe: false,
        }
    }

    /// Skip appending a recipe that is already in the log.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Chronological history for `asset`. A missing log is an empty history.
    pub fn load(&self, asset: &Asset) -> Result<Vec<Recipe>> {
        self.load_at(&asset.log_path())
    }

    pub fn load_at(&self, path: &str) -> Result<Vec<Recipe>> {
        if !self.disk.exists(path)? {
            return Ok(Vec::new());
        }
        let bytes = self.disk.read(path)?;
        serde_json::from_slice(&bytes).map_err(|source| MediaError::CorruptLog {
            path: path.to_string(),
            source,
        })
    }

    /// Append `recipe` to the history. Returns `false` when deduplication skipped it.
    pub fn append(&self, asset: &Asset, recipe: &Recipe) -> Result<bool> {
        if recipe.is_empty() {
            return Err(MediaError::InvalidArgument(
                "cannot log an empty recipe".to_string(),
            ));
        }

        let path = asset.log_path();
        let mut entries = self.load_at(&path)?;
        if self.dedupe && entries.contains(recipe) {
            debug!(log = %path, recipe = %recipe, "recipe already logged, skipping");
            return Ok(false);
        }

        entries.push(recipe.clone());
        let bytes = serde_json::to_vec(&entries)?;
        self.disk.write(&path, &bytes)?;
        debug!(log = %path, recipe = %recipe, entries = entries.len(), "logged recipe");
        Ok(true)
    }

    /// Delete the history document.
    pub fn remove(&self, asset: &Asset) -> Result<()> {
        self.disk.delete(&asset.log_path())
    }
}
