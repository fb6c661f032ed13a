use crate::error::{MediaError, Result};
use crate::model::Asset;
use crate::paths;
use crate::store::AssetStore;
use uuid::Uuid;

/// Find an asset by id, or by its disk-relative path (`foo/bar.jpg`).
pub fn resolve_asset<S: AssetStore>(store: &S, selector: &str) -> Result<Asset> {
    if let Ok(id) = Uuid::parse_str(selector) {
        return store.get_asset(&id);
    }

    let wanted = paths::normalize_directory(selector);
    let mut matches: Vec<Asset> = store
        .list_assets()?
        .into_iter()
        .filter(|a| a.plain_path() == wanted)
        .collect();

    match matches.len() {
        0 => Err(MediaError::Api(format!("No asset at {}", selector))),
        1 => Ok(matches.remove(0)),
        n => Err(MediaError::Api(format!(
            "{} assets live at {} on different disks, use the id",
            n, selector
        ))),
    }
}

/// An asset already registered at `path` on `disk`, if any.
pub fn find_at<S: AssetStore>(store: &S, disk: &str, path: &str) -> Result<Option<Asset>> {
    Ok(store
        .list_assets()?
        .into_iter()
        .find(|a| a.disk == disk && a.plain_path() == path))
}
