use crate::commands::{AssetFile, CmdResult};
use crate::config::MediaConfig;
use crate::disk::DiskSet;
use crate::error::Result;
use crate::manipulation_log::ManipulationLog;
use crate::recipe::Recipe;
use crate::store::AssetStore;
use std::collections::HashSet;

use super::helpers::resolve_asset;

/// The original and every logged variant of an asset, with whether each file exists.
pub fn run<S: AssetStore>(store: &S, disks: &DiskSet, selector: &str) -> Result<CmdResult> {
    let asset = resolve_asset(store, selector)?;
    let disk = disks.get(&asset.disk)?;

    let original = asset.plain_path();
    let mut files = vec![AssetFile {
        recipe: String::new(),
        exists: disk.exists(&original)?,
        path: original,
    }];

    let mut seen = HashSet::new();
    for recipe in ManipulationLog::new(disk).load(&asset)? {
        let path = asset.variant_path(&recipe, true);
        if !seen.insert(path.clone()) {
            continue;
        }
        files.push(AssetFile {
            recipe: recipe.canonical(),
            exists: disk.exists(&path)?,
            path,
        });
    }

    Ok(CmdResult::default().with_files(files))
}

/// Where the variant for `recipe` lives (or would live) for this asset.
pub fn resolve<S: AssetStore>(
    store: &S,
    disks: &DiskSet,
    config: &MediaConfig,
    selector: &str,
    recipe: Recipe,
) -> Result<CmdResult> {
    let mut asset = resolve_asset(store, selector)?;
    let disk = disks.get(&asset.disk)?;

    asset.active_recipe = recipe;
    let path = asset.disk_path(config.manipulation_enabled);
    let file = AssetFile {
        recipe: asset.active_recipe.canonical(),
        exists: disk.exists(&path)?,
        path,
    };
    Ok(CmdResult::default().with_files(vec![file]))
}
