//! # Asset Mover
//!
//! Relocates an asset (new directory and/or new base filename) together with
//! every derived variant its manipulation log knows about, then commits the new
//! location to the record store.
//!
//! ## Order of Operations
//!
//! ```text
//! pre-flight   load log, check primary source, check every destination
//! primary      move {dir}/{name}.{ext}
//! replay       move {dir}/{name}-{recipe}.{ext} for each logged recipe, in log order
//! sidecar      move {dir}/{name}.{ext}.json
//! commit       asset.directory / asset.filename <- target, save record
//! ```
//!
//! `CorruptLog`, `SourceMissing` on the primary and `DestinationExists` are all
//! raised by the pre-flight, before anything on disk changes. A backend failure
//! after the primary move leaves files partially relocated and the record still
//! at the old location. There is no rollback: treat any error from
//! [`AssetMover::execute`] after pre-flight as needing manual inspection.
//!
//! At most one move per asset may run at a time; the caller enforces that.
//!
//! Paths for replayed variants are resolved from the logged recipe directly, so
//! the asset's `active_recipe` is neither consulted nor modified.

use crate::disk::Disk;
use crate::error::{MediaError, Result};
use crate::manipulation_log::ManipulationLog;
use crate::model::Asset;
use crate::paths;
use crate::recipe::Recipe;
use crate::store::AssetStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// What to do when a logged variant has no file on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingVariantPolicy {
    /// Log a warning and carry on.
    #[default]
    Skip,
    /// Abort the move with `SourceMissing` before touching any file.
    Fail,
}

impl fmt::Display for MissingVariantPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingVariantPolicy::Skip => f.write_str("skip"),
            MissingVariantPolicy::Fail => f.write_str("fail"),
        }
    }
}

impl FromStr for MissingVariantPolicy {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "skip" => Ok(MissingVariantPolicy::Skip),
            "fail" => Ok(MissingVariantPolicy::Fail),
            other => Err(MediaError::InvalidArgument(format!(
                "unknown missing-variant policy: {} (expected skip or fail)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantMove {
    pub recipe: Recipe,
    pub from: String,
    pub to: String,
}

/// Everything a move will touch, computed without mutating anything.
#[derive(Debug, Clone)]
pub struct MovePlan {
    pub target_directory: String,
    pub target_filename: String,
    pub primary_from: String,
    pub primary_to: String,
    pub variants: Vec<VariantMove>,
    /// Logged variants whose file was not found.
    pub missing: Vec<String>,
    pub log: Option<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct MoveReport {
    pub from: String,
    pub to: String,
    pub relocated: Vec<VariantMove>,
    pub skipped: Vec<String>,
    pub log_moved: bool,
}

pub struct AssetMover {
    directory: String,
    filename: Option<String>,
    policy: MissingVariantPolicy,
}

impl AssetMover {
    /// Move into `directory` (leading/trailing `/` are trimmed).
    pub fn new(directory: &str) -> Self {
        Self {
            directory: paths::normalize_directory(directory),
            filename: None,
            policy: MissingVariantPolicy::default(),
        }
    }

    /// Rename as well. A trailing `.{ext}` matching the asset's extension is dropped.
    pub fn with_filename(mut self, filename: Option<&str>) -> Self {
        self.filename = filename.filter(|f| !f.is_empty()).map(str::to_string);
        self
    }

    pub fn with_missing_variant_policy(mut self, policy: MissingVariantPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The base filename the asset will have after the move.
    pub fn target_filename(&self, asset: &Asset) -> String {
        match &self.filename {
            Some(name) => paths::strip_extension(name, &asset.extension).to_string(),
            None => asset.filename.clone(),
        }
    }

    /// Resolve every source and destination and run all pre-flight checks.
    pub fn plan(&self, asset: &Asset, disk: &dyn Disk) -> Result<MovePlan> {
        let target_filename = self.target_filename(asset);
        if target_filename.is_empty() || target_filename.contains('/') {
            return Err(MediaError::InvalidArgument(format!(
                "invalid target filename: '{}'",
                target_filename
            )));
        }

        let mut target = asset.clone();
        target.directory = self.directory.clone();
        target.filename = target_filename.clone();

        let history = ManipulationLog::new(disk).load(asset)?;

        let primary_from = asset.plain_path();
        let primary_to = target.plain_path();
        if !disk.exists(&primary_from)? {
            return Err(MediaError::SourceMissing(primary_from));
        }
        if disk.exists(&primary_to)? {
            return Err(MediaError::DestinationExists(primary_to));
        }

        let mut seen = HashSet::new();
        let mut variants = Vec::new();
        let mut missing = Vec::new();
        for recipe in history {
            let from = asset.variant_path(&recipe, true);
            let to = target.variant_path(&recipe, true);
            if from == primary_from {
                warn!(asset = %asset.id, recipe = %recipe, "logged recipe does not name a variant, ignoring");
                continue;
            }
            if !seen.insert(from.clone()) {
                debug!(variant = %from, "duplicate log entry, already planned");
                continue;
            }

            if !disk.exists(&from)? {
                match self.policy {
                    MissingVariantPolicy::Fail => return Err(MediaError::SourceMissing(from)),
                    MissingVariantPolicy::Skip => {
                        missing.push(from);
                        continue;
                    }
                }
            }
            if disk.exists(&to)? {
                return Err(MediaError::DestinationExists(to));
            }
            variants.push(VariantMove { recipe, from, to });
        }

        // A log already at the target belongs to some other asset, even when
        // this one has none to bring along.
        let log_from = asset.log_path();
        let log_to = target.log_path();
        if disk.exists(&log_to)? {
            return Err(MediaError::DestinationExists(log_to));
        }
        let log = if disk.exists(&log_from)? {
            Some((log_from, log_to))
        } else {
            None
        };

        Ok(MovePlan {
            target_directory: target.directory,
            target_filename,
            primary_from,
            primary_to,
            variants,
            missing,
            log,
        })
    }

    /// Relocate the asset, its variants and its log, then save the new location.
    pub fn execute<S: AssetStore>(
        &self,
        asset: &mut Asset,
        disk: &dyn Disk,
        store: &mut S,
    ) -> Result<MoveReport> {
        let plan = self.plan(asset, disk)?;
        let mut report = MoveReport {
            from: plan.primary_from.clone(),
            to: plan.primary_to.clone(),
            ..Default::default()
        };

        disk.move_file(&plan.primary_from, &plan.primary_to)?;
        debug!(from = %plan.primary_from, to = %plan.primary_to, "moved primary file");

        for path in &plan.missing {
            warn!(variant = %path, "logged variant not found, skipping");
        }
        report.skipped = plan.missing;

        for variant in plan.variants {
            match disk.move_file(&variant.from, &variant.to) {
                Ok(()) => {
                    debug!(from = %variant.from, to = %variant.to, "moved variant");
                    report.relocated.push(variant);
                }
                Err(MediaError::SourceMissing(path))
                    if self.policy == MissingVariantPolicy::Skip =>
                {
                    warn!(variant = %path, "variant disappeared during move, skipping");
                    report.skipped.push(path);
                }
                Err(e) => return Err(e),
            }
        }

        if let Some((from, to)) = &plan.log {
            disk.move_file(from, to)?;
            report.log_moved = true;
        }

        asset.directory = plan.target_directory;
        asset.filename = plan.target_filename;
        asset.updated_at = Utc::now();
        store.save_asset(asset)?;
        info!(
            asset = %asset.id,
            from = %report.from,
            to = %report.to,
            variants = report.relocated.len(),
            skipped = report.skipped.len(),
            "asset moved"
        );

        Ok(report)
    }
}
