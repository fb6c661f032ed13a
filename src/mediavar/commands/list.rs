use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::AssetStore;

pub fn run<S: AssetStore>(store: &S, disk: Option<&str>) -> Result<CmdResult> {
    let assets: Vec<_> = store
        .list_assets()?
        .into_iter()
        .filter(|a| disk.map_or(true, |d| a.disk == d))
        .collect();

    let mut result = CmdResult::default();
    if assets.is_empty() {
        result.add_message(CmdMessage::info("No assets found."));
    }
    Ok(result.with_listed_assets(assets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Asset, AssetKind};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn filters_by_disk() {
        let mut store = InMemoryStore::new();
        store
            .save_asset(&Asset::new("a", "foo", "one", "jpg", AssetKind::Image))
            .unwrap();
        store
            .save_asset(&Asset::new("b", "foo", "two", "jpg", AssetKind::Image))
            .unwrap();

        assert_eq!(run(&store, None).unwrap().listed_assets.len(), 2);
        let only_b = run(&store, Some("b")).unwrap();
        assert_eq!(only_b.listed_assets.len(), 1);
        assert_eq!(only_b.listed_assets[0].filename, "two");
    }

    #[test]
    fn empty_store_says_so() {
        let store = InMemoryStore::new();
        let result = run(&store, None).unwrap();
        assert!(result.listed_assets.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
