use crate::commands::{CmdMessage, CmdResult};
use crate::disk::DiskSet;
use crate::error::Result;
use crate::manipulation_log::ManipulationLog;
use crate::store::AssetStore;

use super::helpers::resolve_asset;

pub fn run<S: AssetStore>(store: &S, disks: &DiskSet, selector: &str) -> Result<CmdResult> {
    let asset = resolve_asset(store, selector)?;
    let disk = disks.get(&asset.disk)?;
    let history = ManipulationLog::new(disk).load(&asset)?;

    let mut result = CmdResult::default();
    if history.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No manipulations logged for {}",
            asset.plain_path()
        )));
    }
    Ok(result.with_history(history))
}
