use crate::commands::{CmdMessage, CmdResult};
use crate::disk::DiskSet;
use crate::error::{MediaError, Result};
use crate::model::{Asset, AssetKind};
use crate::store::AssetStore;

use super::helpers::find_at;

/// Register a file that already exists on `disk_name` as an asset.
pub fn run<S: AssetStore>(
    store: &mut S,
    disks: &DiskSet,
    disk_name: &str,
    path: &str,
    kind: Option<AssetKind>,
) -> Result<CmdResult> {
    let disk = disks.get(disk_name)?;
    let mut asset = Asset::from_disk_path(disk_name, path);
    if asset.filename.is_empty() {
        return Err(MediaError::InvalidArgument(format!(
            "'{}' does not name a file",
            path
        )));
    }
    if let Some(kind) = kind {
        asset.kind = kind;
    }

    let plain = asset.plain_path();
    if !disk.exists(&plain)? {
        return Err(MediaError::SourceMissing(plain));
    }
    if let Some(existing) = find_at(store, disk_name, &plain)? {
        return Err(MediaError::Api(format!(
            "{} is already registered as {}",
            plain, existing.id
        )));
    }

    store.save_asset(&asset)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Asset added: {} ({}, {})",
        plain, asset.kind, asset.id
    )));
    Ok(result.with_affected_assets(vec![asset]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::memory::MemDisk;
    use crate::disk::Disk;
    use crate::store::memory::InMemoryStore;

    fn disks() -> DiskSet {
        let disk = MemDisk::new();
        disk.write("foo/bar.jpg", b"x").unwrap();
        disk.write("docs/readme", b"x").unwrap();
        DiskSet::new().with_disk("tmp", disk)
    }

    #[test]
    fn registers_existing_file() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &disks(), "tmp", "/foo/bar.jpg", None).unwrap();

        let asset = &result.affected_assets[0];
        assert_eq!(asset.directory, "foo");
        assert_eq!(asset.filename, "bar");
        assert_eq!(asset.kind, AssetKind::Image);
        assert_eq!(store.list_assets().unwrap().len(), 1);
    }

    #[test]
    fn kind_can_be_overridden() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &disks(), "tmp", "foo/bar.jpg", Some(AssetKind::Other)).unwrap();
        assert_eq!(result.affected_assets[0].kind, AssetKind::Other);
    }

    #[test]
    fn files_without_extension() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &disks(), "tmp", "docs/readme", None).unwrap();
        assert_eq!(result.affected_assets[0].plain_path(), "docs/readme");
    }

    #[test]
    fn rejects_missing_file_and_duplicates() {
        let mut store = InMemoryStore::new();
        let disks = disks();
        assert!(matches!(
            run(&mut store, &disks, "tmp", "foo/nope.jpg", None),
            Err(MediaError::SourceMissing(_))
        ));
        assert!(matches!(
            run(&mut store, &disks, "s3", "foo/bar.jpg", None),
            Err(MediaError::UnknownDisk(_))
        ));

        run(&mut store, &disks, "tmp", "foo/bar.jpg", None).unwrap();
        assert!(matches!(
            run(&mut store, &disks, "tmp", "foo/bar.jpg", None),
            Err(MediaError::Api(_))
        ));
    }
}
