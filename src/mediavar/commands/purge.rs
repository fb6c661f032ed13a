use crate::commands::{CmdMessage, CmdResult};
use crate::disk::DiskSet;
use crate::error::Result;
use crate::manipulation_log::ManipulationLog;
use crate::store::AssetStore;
use std::collections::HashSet;

use super::helpers::resolve_asset;

/// Delete every logged variant of an asset and its log. The original stays.
pub fn run<S: AssetStore>(store: &S, disks: &DiskSet, selector: &str) -> Result<CmdResult> {
    let asset = resolve_asset(store, selector)?;
    let disk = disks.get(&asset.disk)?;
    let log = ManipulationLog::new(disk);
    let history = log.load(&asset)?;

    let original = asset.plain_path();
    let mut seen = HashSet::new();
    let mut result = CmdResult::default();
    for recipe in &history {
        let path = asset.variant_path(recipe, true);
        if path == original || !seen.insert(path.clone()) {
            continue;
        }
        if disk.exists(&path)? {
            disk.delete(&path)?;
            result.add_message(CmdMessage::success(format!("Deleted {}", path)));
        }
    }
    log.remove(&asset)?;

    if history.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No variants logged for {}",
            original
        )));
    }
    Ok(result.with_affected_assets(vec![asset]))
}
