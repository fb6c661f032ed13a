use crate::commands::{CmdMessage, CmdResult};
use crate::config::MediaConfig;
use crate::disk::DiskSet;
use crate::error::{MediaError, Result};
use crate::manipulation_log::ManipulationLog;
use crate::recipe::Recipe;
use crate::registry::OperationRegistry;
use crate::store::AssetStore;

use super::helpers::resolve_asset;

/// Log a variant that something else already wrote to its canonical path.
///
/// With `strict`, the recipe must only use the default image operations.
pub fn run<S: AssetStore>(
    store: &S,
    disks: &DiskSet,
    config: &MediaConfig,
    selector: &str,
    recipe: &Recipe,
    strict: bool,
) -> Result<CmdResult> {
    let asset = resolve_asset(store, selector)?;
    let disk = disks.get(&asset.disk)?;

    if recipe.is_empty() {
        return Err(MediaError::InvalidArgument(
            "cannot record an empty recipe".to_string(),
        ));
    }
    if !asset.is_image() {
        return Err(MediaError::Api(format!(
            "{} is a {} asset; only images have variants",
            asset.plain_path(),
            asset.kind
        )));
    }
    if strict {
        OperationRegistry::image_defaults().validate(recipe)?;
    }

    let path = asset.variant_path(recipe, true);
    if !disk.exists(&path)? {
        return Err(MediaError::SourceMissing(path));
    }

    let appended = ManipulationLog::new(disk)
        .with_dedupe(config.dedupe_log)
        .append(&asset, recipe)?;

    let mut result = CmdResult::default();
    if appended {
        result.add_message(CmdMessage::success(format!("Recorded {}", path)));
    } else {
        result.add_message(CmdMessage::info(format!("Already recorded: {}", path)));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::memory::MemDisk;
    use crate::disk::Disk;
    use crate::model::{Asset, AssetKind};
    use crate::store::memory::InMemoryStore;

    fn setup(kind: AssetKind) -> (InMemoryStore, DiskSet, Asset) {
        let asset = Asset::new("tmp", "foo", "bar", "jpg", kind);
        let disk = MemDisk::new();
        disk.write("foo/bar.jpg", b"o").unwrap();
        disk.write("foo/bar-resize+250,250.jpg", b"v").unwrap();
        disk.write("foo/bar-sepia+.jpg", b"v").unwrap();
        let mut store = InMemoryStore::new();
        store.save_asset(&asset).unwrap();
        (store, DiskSet::new().with_disk("tmp", disk), asset)
    }

    fn resize() -> Recipe {
        Recipe::new().with("resize", [250, 250]).unwrap()
    }

    fn history(disks: &DiskSet, asset: &Asset) -> Vec<Recipe> {
        ManipulationLog::new(disks.get("tmp").unwrap())
            .load(asset)
            .unwrap()
    }

    #[test]
    fn records_existing_variant() {
        let (store, disks, asset) = setup(AssetKind::Image);
        run(&store, &disks, &MediaConfig::default(), "foo/bar.jpg", &resize(), true).unwrap();
        assert_eq!(history(&disks, &asset), vec![resize()]);
    }

    #[test]
    fn requires_variant_file() {
        let (store, disks, _) = setup(AssetKind::Image);
        let recipe = Recipe::new().with("blur", [2]).unwrap();
        assert!(matches!(
            run(&store, &disks, &MediaConfig::default(), "foo/bar.jpg", &recipe, false),
            Err(MediaError::SourceMissing(_))
        ));
    }

    #[test]
    fn strict_mode_checks_registry() {
        let (store, disks, asset) = setup(AssetKind::Image);
        let sepia = Recipe::new().with("sepia", Vec::<i64>::new()).unwrap();
        let config = MediaConfig::default();

        assert!(matches!(
            run(&store, &disks, &config, "foo/bar.jpg", &sepia, true),
            Err(MediaError::InvalidArgument(_))
        ));
        run(&store, &disks, &config, "foo/bar.jpg", &sepia, false).unwrap();
        assert_eq!(history(&disks, &asset), vec![sepia]);
    }

    #[test]
    fn dedupe_follows_config() {
        let (store, disks, asset) = setup(AssetKind::Image);
        let mut config = MediaConfig::default();
        config.dedupe_log = true;

        run(&store, &disks, &config, "foo/bar.jpg", &resize(), true).unwrap();
        let again = run(&store, &disks, &config, "foo/bar.jpg", &resize(), true).unwrap();
        assert!(again.messages[0].content.starts_with("Already"));
        assert_eq!(history(&disks, &asset).len(), 1);
    }

    #[test]
    fn non_images_have_no_variants() {
        let (store, disks, _) = setup(AssetKind::Vector);
        assert!(matches!(
            run(&store, &disks, &MediaConfig::default(), "foo/bar.jpg", &resize(), true),
            Err(MediaError::Api(_))
        ));
    }
}
