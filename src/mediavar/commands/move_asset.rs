use crate::commands::{CmdMessage, CmdResult};
use crate::config::MediaConfig;
use crate::disk::DiskSet;
use crate::error::Result;
use crate::mover::AssetMover;
use crate::store::AssetStore;

use super::helpers::resolve_asset;

/// Move (and optionally rename) an asset together with all its logged variants.
pub fn run<S: AssetStore>(
    store: &mut S,
    disks: &DiskSet,
    config: &MediaConfig,
    selector: &str,
    directory: &str,
    filename: Option<&str>,
) -> Result<CmdResult> {
    let mut asset = resolve_asset(store, selector)?;
    let disk = disks.get(&asset.disk)?;

    let report = AssetMover::new(directory)
        .with_filename(filename)
        .with_missing_variant_policy(config.missing_variant_policy)
        .execute(&mut asset, disk, store)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Moved {} -> {}",
        report.from, report.to
    )));
    for variant in &report.relocated {
        result.add_message(CmdMessage::info(format!(
            "  {} -> {}",
            variant.from, variant.to
        )));
    }
    for path in &report.skipped {
        result.add_message(CmdMessage::warning(format!(
            "  variant not found, skipped: {}",
            path
        )));
    }

    Ok(result.with_affected_assets(vec![asset]))
}
